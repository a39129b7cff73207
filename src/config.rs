use serde::{Deserialize, Serialize};

/// Application-level constants
pub const APP_NAME: &str = "Carciscan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum Jaro-Winkler score for a synonym match to be accepted.
/// Deliberately strict: a false-positive identity match silently swaps
/// in the wrong chemical's toxicology profile.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.95;

/// Fragments longer than this many whitespace tokens are treated as
/// OCR-captured prose (marketing copy), not ingredient names.
pub const MAX_NAME_TOKENS: usize = 20;

/// Descriptor values are clipped to [-DESCRIPTOR_CLIP, DESCRIPTOR_CLIP]
/// before alignment. Degenerate structures can produce overflow outliers.
pub const DESCRIPTOR_CLIP: f64 = 1e15;

/// Base URL for PubChem compound pages, suffixed with the CID.
pub const PUBCHEM_COMPOUND_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/compound";

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "carciscan=info"
}

/// Tunable knobs for a single analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum similarity score for identity resolution, in [0, 1].
    pub acceptance_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn default_threshold_is_strict() {
        let config = AnalysisConfig::default();
        assert!(config.acceptance_threshold >= 0.95);
        assert!(config.acceptance_threshold <= 1.0);
    }

    #[test]
    fn clip_bound_is_symmetric_and_finite() {
        assert!(DESCRIPTOR_CLIP.is_finite());
        assert!(DESCRIPTOR_CLIP > 0.0);
    }
}
