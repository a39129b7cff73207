use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Unordered, possibly sparse map of descriptor name to computed value.
/// Values may be non-finite for degenerate structures; the aligner is
/// responsible for making them safe.
pub type DescriptorMap = HashMap<String, f64>;

/// A resolved chemical identity for one candidate ingredient name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChemicalIdentity {
    /// Compound identifier, the canonical key for the chemical.
    pub cid: i64,
    /// The corpus synonym that won the fuzzy match.
    pub matched_synonym: String,
    /// Similarity score of the winning synonym, in [0, 1].
    pub similarity_score: f64,
}

/// Output of the carcinogenicity classifier for one ingredient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarcinogenicityPrediction {
    /// Predicted IARC group label (e.g. "Group 2B").
    pub group: String,
    /// Probability per group label; sums to 1 across labels.
    pub confidence_by_group: Vec<(String, f64)>,
    /// Evidence definition text for the predicted group.
    pub evidence: String,
}

impl CarcinogenicityPrediction {
    /// Probability the classifier assigned to its own predicted label.
    /// This is the prediction's confidence, not the max over all labels
    /// (the two usually coincide).
    pub fn predicted_probability(&self) -> f64 {
        self.confidence_by_group
            .iter()
            .find(|(label, _)| *label == self.group)
            .map(|(_, p)| *p)
            .unwrap_or(0.0)
    }
}

/// Output of the route-of-exposure classifier for one ingredient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePrediction {
    /// Predicted route labels; possibly empty, possibly multi-valued.
    pub routes: Vec<String>,
    /// Positive-class probability per route label.
    pub confidence_by_route: Vec<(String, f64)>,
}

/// Terminal state of one ingredient's mini-pipeline. Every candidate
/// reaches exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngredientStatus {
    /// Resolved, structured, described, and classified.
    #[serde(rename = "Success")]
    Success,
    /// No corpus synonym cleared the acceptance threshold.
    #[serde(rename = "Synonym not found in database")]
    SynonymNotFound,
    /// Identity resolved but the corpus holds no structure for the CID.
    #[serde(rename = "SMILES not found in database")]
    SmilesNotFound,
    /// The descriptor engine rejected the structure.
    #[serde(rename = "Could not calculate molecular descriptors")]
    DescriptorFailure,
    /// One or both classifiers failed on the aligned vector.
    #[serde(rename = "Prediction model failed")]
    PredictionFailure,
}

impl IngredientStatus {
    /// Human-readable status string surfaced in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientStatus::Success => "Success",
            IngredientStatus::SynonymNotFound => "Synonym not found in database",
            IngredientStatus::SmilesNotFound => "SMILES not found in database",
            IngredientStatus::DescriptorFailure => "Could not calculate molecular descriptors",
            IngredientStatus::PredictionFailure => "Prediction model failed",
        }
    }
}

impl std::fmt::Display for IngredientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the pipeline learned about one candidate ingredient.
/// Terminal once produced; the batch never mutates an outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientOutcome {
    /// The candidate name as segmented from OCR text.
    pub name: String,
    pub status: IngredientStatus,
    pub identity: Option<ChemicalIdentity>,
    pub carcinogenicity: Option<CarcinogenicityPrediction>,
    pub route: Option<RoutePrediction>,
    /// Predicted-group probability as a percentage string, two decimals
    /// (e.g. "82.50"). Present only on success.
    pub confidence_display: Option<String>,
    /// PubChem compound page; present once a structure is known.
    pub pubchem_url: Option<String>,
}
