//! Classification adapter: runs the two externally-trained classifiers
//! over a descriptor map and normalizes their output shape. All model
//! faults are absorbed here; classification failure for one ingredient
//! must never abort the batch.

use std::sync::Arc;

use crate::reference;

use super::align::align;
use super::models::{CarcinogenicityModel, ModelError, ModelSlot, RouteModel};
use super::types::{CarcinogenicityPrediction, DescriptorMap, RoutePrediction};

type CarcLoader = Box<dyn Fn() -> Result<Arc<dyn CarcinogenicityModel>, ModelError> + Send + Sync>;
type RouteLoader = Box<dyn Fn() -> Result<Arc<dyn RouteModel>, ModelError> + Send + Sync>;

/// Holds both classifier artifacts behind load-once slots.
///
/// Each model is loaded on first use; a failed load is recorded once and
/// every later classification returns `None` without retrying.
pub struct ClassifierSet {
    carc_loader: CarcLoader,
    route_loader: RouteLoader,
    carc_slot: ModelSlot<dyn CarcinogenicityModel>,
    route_slot: ModelSlot<dyn RouteModel>,
}

impl ClassifierSet {
    pub fn new(carc_loader: CarcLoader, route_loader: RouteLoader) -> Self {
        Self {
            carc_loader,
            route_loader,
            carc_slot: ModelSlot::new(),
            route_slot: ModelSlot::new(),
        }
    }

    /// Wrap already-loaded artifacts (tests, embedded deployments).
    pub fn preloaded(carc: Arc<dyn CarcinogenicityModel>, route: Arc<dyn RouteModel>) -> Self {
        Self::new(
            Box::new(move || Ok(carc.clone())),
            Box::new(move || Ok(route.clone())),
        )
    }

    /// Predict the IARC group for a descriptor map, or `None` on any
    /// internal failure. Confidence is read as the probability assigned
    /// to the predicted label itself.
    pub fn classify_carcinogenicity(
        &self,
        descriptors: &DescriptorMap,
    ) -> Option<CarcinogenicityPrediction> {
        let model = self
            .carc_slot
            .get_or_load("carcinogenicity", || (self.carc_loader)())?;

        let vector = align(descriptors, model.feature_names())?;

        let group = match model.predicted_label(&vector) {
            Ok(label) => label,
            Err(e) => {
                tracing::warn!(error = %e, "Carcinogenicity prediction failed");
                return None;
            }
        };
        let confidence_by_group = match model.label_probabilities(&vector) {
            Ok(probs) => probs,
            Err(e) => {
                tracing::warn!(error = %e, "Carcinogenicity probabilities failed");
                return None;
            }
        };

        let evidence = reference::iarc_evidence(&group)
            .unwrap_or("Evidence not available.")
            .to_string();

        Some(CarcinogenicityPrediction {
            group,
            confidence_by_group,
            evidence,
        })
    }

    /// Predict the route-of-exposure label set, or `None` on any internal
    /// failure. Route confidence is the positive-class probability per
    /// route label.
    pub fn classify_route(&self, descriptors: &DescriptorMap) -> Option<RoutePrediction> {
        let model = self.route_slot.get_or_load("route", || (self.route_loader)())?;

        let vector = align(descriptors, model.feature_names())?;

        let routes = match model.predicted_routes(&vector) {
            Ok(routes) => routes,
            Err(e) => {
                tracing::warn!(error = %e, "Route prediction failed");
                return None;
            }
        };
        let confidence_by_route = match model.route_probabilities(&vector) {
            Ok(probs) => probs,
            Err(e) => {
                tracing::warn!(error = %e, "Route probabilities failed");
                return None;
            }
        };

        Some(RoutePrediction {
            routes,
            confidence_by_route,
        })
    }
}
