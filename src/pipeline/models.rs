use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model artifact not found at {0}")]
    ArtifactNotFound(PathBuf),

    #[error("Model artifact could not be read: {0}")]
    ArtifactRead(String),

    #[error("Feature vector has wrong shape: expected {expected}, got {got}")]
    FeatureShape { expected: usize, got: usize },

    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Trained carcinogenicity classifier artifact. Keyed to a fixed
/// feature-name order that aligned vectors must match exactly.
pub trait CarcinogenicityModel: Send + Sync {
    fn feature_names(&self) -> &[String];

    fn predicted_label(&self, vector: &[f64]) -> Result<String, ModelError>;

    /// Probability per group label; sums to 1 across labels.
    fn label_probabilities(&self, vector: &[f64]) -> Result<Vec<(String, f64)>, ModelError>;
}

/// Trained multi-label route-of-exposure classifier artifact.
pub trait RouteModel: Send + Sync {
    fn feature_names(&self) -> &[String];

    /// Predicted route label set; possibly empty.
    fn predicted_routes(&self, vector: &[f64]) -> Result<Vec<String>, ModelError>;

    /// Positive-class probability per route label.
    fn route_probabilities(&self, vector: &[f64]) -> Result<Vec<(String, f64)>, ModelError>;
}

/// Process-wide load-once holder for a model artifact.
///
/// The first caller runs the loader; concurrent first use is guarded so
/// the load happens at most once. A load failure is recorded and every
/// later call returns `None` without retrying the load.
pub struct ModelSlot<M: ?Sized> {
    cell: OnceLock<Option<Arc<M>>>,
}

impl<M: ?Sized> ModelSlot<M> {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    pub fn get_or_load<F>(&self, name: &str, load: F) -> Option<Arc<M>>
    where
        F: FnOnce() -> Result<Arc<M>, ModelError>,
    {
        self.cell
            .get_or_init(|| match load() {
                Ok(model) => {
                    tracing::info!(model = name, "Model artifact loaded");
                    Some(model)
                }
                Err(e) => {
                    tracing::error!(
                        model = name,
                        error = %e,
                        "Model artifact failed to load; predictions disabled"
                    );
                    None
                }
            })
            .clone()
    }
}

impl<M: ?Sized> Default for ModelSlot<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock carcinogenicity model with a fixed answer.
pub struct MockCarcinogenicityModel {
    features: Vec<String>,
    label: String,
    probabilities: Vec<(String, f64)>,
}

impl MockCarcinogenicityModel {
    pub fn new(features: &[&str], label: &str, probabilities: &[(&str, f64)]) -> Self {
        Self {
            features: features.iter().map(|f| f.to_string()).collect(),
            label: label.to_string(),
            probabilities: probabilities
                .iter()
                .map(|(l, p)| (l.to_string(), *p))
                .collect(),
        }
    }
}

impl CarcinogenicityModel for MockCarcinogenicityModel {
    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn predicted_label(&self, vector: &[f64]) -> Result<String, ModelError> {
        check_shape(self.features.len(), vector.len())?;
        Ok(self.label.clone())
    }

    fn label_probabilities(&self, vector: &[f64]) -> Result<Vec<(String, f64)>, ModelError> {
        check_shape(self.features.len(), vector.len())?;
        Ok(self.probabilities.clone())
    }
}

/// Mock route model with a fixed answer.
pub struct MockRouteModel {
    features: Vec<String>,
    routes: Vec<String>,
    probabilities: Vec<(String, f64)>,
}

impl MockRouteModel {
    pub fn new(features: &[&str], routes: &[&str], probabilities: &[(&str, f64)]) -> Self {
        Self {
            features: features.iter().map(|f| f.to_string()).collect(),
            routes: routes.iter().map(|r| r.to_string()).collect(),
            probabilities: probabilities
                .iter()
                .map(|(l, p)| (l.to_string(), *p))
                .collect(),
        }
    }
}

impl RouteModel for MockRouteModel {
    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn predicted_routes(&self, vector: &[f64]) -> Result<Vec<String>, ModelError> {
        check_shape(self.features.len(), vector.len())?;
        Ok(self.routes.clone())
    }

    fn route_probabilities(&self, vector: &[f64]) -> Result<Vec<(String, f64)>, ModelError> {
        check_shape(self.features.len(), vector.len())?;
        Ok(self.probabilities.clone())
    }
}

fn check_shape(expected: usize, got: usize) -> Result<(), ModelError> {
    if expected != got {
        return Err(ModelError::FeatureShape { expected, got });
    }
    Ok(())
}
