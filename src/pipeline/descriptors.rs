use thiserror::Error;

use super::types::DescriptorMap;

#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("Invalid structure encoding: {0}")]
    InvalidStructure(String),

    #[error("Descriptor computation failed: {0}")]
    Computation(String),
}

/// Cheminformatics engine abstraction: computes molecular descriptors
/// from a SMILES string. Fails on unparseable encodings.
pub trait DescriptorEngine: Send + Sync {
    fn describe(&self, smiles: &str) -> Result<DescriptorMap, DescriptorError>;
}

/// Mock descriptor engine returning a fixed map, or a fixed failure.
pub struct MockDescriptorEngine {
    descriptors: Option<DescriptorMap>,
}

impl MockDescriptorEngine {
    pub fn new(descriptors: DescriptorMap) -> Self {
        Self {
            descriptors: Some(descriptors),
        }
    }

    pub fn failing() -> Self {
        Self { descriptors: None }
    }
}

impl DescriptorEngine for MockDescriptorEngine {
    fn describe(&self, smiles: &str) -> Result<DescriptorMap, DescriptorError> {
        self.descriptors
            .clone()
            .ok_or_else(|| DescriptorError::InvalidStructure(smiles.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_engine_returns_map() {
        let mut map = DescriptorMap::new();
        map.insert("MolWt".into(), 18.02);
        let engine = MockDescriptorEngine::new(map);
        let result = engine.describe("O").unwrap();
        assert_eq!(result.get("MolWt"), Some(&18.02));
    }

    #[test]
    fn failing_engine_reports_structure() {
        let engine = MockDescriptorEngine::failing();
        let err = engine.describe("C1=CC=CC=C1X").unwrap_err();
        assert!(err.to_string().contains("C1=CC=CC=C1X"));
    }
}
