//! Per-ingredient orchestration. Each candidate name runs its own
//! mini-pipeline to exactly one terminal state:
//!
//! ```text
//! NEW --resolve--> RESOLVED | UNRESOLVED*
//! RESOLVED --lookup SMILES--> STRUCTURED | STRUCTURE_MISSING*
//! STRUCTURED --describe--> DESCRIBED | DESCRIPTOR_FAILED*
//! DESCRIBED --classify--> CLASSIFIED* | CLASSIFICATION_FAILED*
//! ```
//!
//! Ingredients are independent: no fault here ever propagates past this
//! boundary or short-circuits the rest of the batch.

use std::sync::Arc;

use crate::config::PUBCHEM_COMPOUND_URL;
use crate::db::ChemicalCorpus;

use super::classify::ClassifierSet;
use super::descriptors::DescriptorEngine;
use super::resolve::IdentityResolver;
use super::types::{ChemicalIdentity, IngredientOutcome, IngredientStatus};

/// Drives one candidate name through resolve → structure lookup →
/// describe → classify. Trait-based DI throughout so the whole pipeline
/// runs against mocks in tests.
pub struct IngredientProcessor {
    resolver: IdentityResolver,
    corpus: Arc<dyn ChemicalCorpus>,
    descriptors: Arc<dyn DescriptorEngine>,
    classifiers: ClassifierSet,
}

impl IngredientProcessor {
    pub fn new(
        resolver: IdentityResolver,
        corpus: Arc<dyn ChemicalCorpus>,
        descriptors: Arc<dyn DescriptorEngine>,
        classifiers: ClassifierSet,
    ) -> Self {
        Self {
            resolver,
            corpus,
            descriptors,
            classifiers,
        }
    }

    /// Process every candidate in order. The output is 1:1 with the
    /// input by position, so callers can always correlate the two.
    pub fn process_all(&self, names: &[String]) -> Vec<IngredientOutcome> {
        names.iter().map(|name| self.process(name)).collect()
    }

    /// Run one candidate to its terminal state. Never fails.
    pub fn process(&self, name: &str) -> IngredientOutcome {
        let _span = tracing::debug_span!("ingredient", name).entered();

        // NEW → RESOLVED | UNRESOLVED
        let identity = match self.resolver.resolve(self.corpus.as_ref(), name) {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                return terminal(name, IngredientStatus::SynonymNotFound, None, false);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Corpus scan failed during resolution");
                return terminal(name, IngredientStatus::SynonymNotFound, None, false);
            }
        };

        // RESOLVED → STRUCTURED | STRUCTURE_MISSING
        let smiles = match self.corpus.smiles_by_cid(identity.cid) {
            Ok(Some(smiles)) => smiles,
            Ok(None) => {
                return terminal(name, IngredientStatus::SmilesNotFound, Some(identity), false);
            }
            Err(e) => {
                tracing::warn!(error = %e, cid = identity.cid, "SMILES lookup failed");
                return terminal(name, IngredientStatus::SmilesNotFound, Some(identity), false);
            }
        };

        // STRUCTURED → DESCRIBED | DESCRIPTOR_FAILED
        let descriptors = match self.descriptors.describe(&smiles) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(error = %e, cid = identity.cid, "Descriptor computation failed");
                return terminal(name, IngredientStatus::DescriptorFailure, Some(identity), true);
            }
        };

        // DESCRIBED → CLASSIFIED | CLASSIFICATION_FAILED
        let carcinogenicity = self.classifiers.classify_carcinogenicity(&descriptors);
        let route = self.classifiers.classify_route(&descriptors);

        match (carcinogenicity, route) {
            (Some(carcinogenicity), Some(route)) => {
                let confidence = carcinogenicity.predicted_probability() * 100.0;
                IngredientOutcome {
                    name: name.to_string(),
                    status: IngredientStatus::Success,
                    pubchem_url: Some(pubchem_url(identity.cid)),
                    identity: Some(identity),
                    carcinogenicity: Some(carcinogenicity),
                    route: Some(route),
                    confidence_display: Some(format!("{confidence:.2}")),
                }
            }
            _ => terminal(name, IngredientStatus::PredictionFailure, Some(identity), true),
        }
    }
}

fn pubchem_url(cid: i64) -> String {
    format!("{PUBCHEM_COMPOUND_URL}/{cid}")
}

fn terminal(
    name: &str,
    status: IngredientStatus,
    identity: Option<ChemicalIdentity>,
    structure_known: bool,
) -> IngredientOutcome {
    let pubchem_url = if structure_known {
        identity.as_ref().map(|id| pubchem_url(id.cid))
    } else {
        None
    };
    IngredientOutcome {
        name: name.to_string(),
        status,
        identity,
        carcinogenicity: None,
        route: None,
        confidence_display: None,
        pubchem_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DatabaseError, InMemoryCorpus};
    use crate::pipeline::descriptors::MockDescriptorEngine;
    use crate::pipeline::models::{MockCarcinogenicityModel, MockRouteModel, ModelError};
    use crate::pipeline::types::DescriptorMap;
    use std::path::PathBuf;

    const FEATURES: &[&str] = &["MolWt", "LogP"];

    fn descriptors() -> DescriptorMap {
        [("MolWt", 18.02), ("LogP", -0.5)]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    fn corpus() -> Arc<InMemoryCorpus> {
        Arc::new(
            InMemoryCorpus::new()
                .with_compound(962, "O", &["water"])
                .with_orphan_synonym(404, "phantom"),
        )
    }

    fn classifiers() -> ClassifierSet {
        ClassifierSet::preloaded(
            Arc::new(MockCarcinogenicityModel::new(
                FEATURES,
                "Group 3",
                &[("Group 3", 0.80), ("Group 2B", 0.20)],
            )),
            Arc::new(MockRouteModel::new(
                FEATURES,
                &["dermal"],
                &[("dermal", 0.70)],
            )),
        )
    }

    fn processor(engine: MockDescriptorEngine) -> IngredientProcessor {
        IngredientProcessor::new(
            IdentityResolver::with_threshold(0.95),
            corpus(),
            Arc::new(engine),
            classifiers(),
        )
    }

    #[test]
    fn full_success_path() {
        let processor = processor(MockDescriptorEngine::new(descriptors()));
        let outcome = processor.process("Water");

        assert_eq!(outcome.status, IngredientStatus::Success);
        assert_eq!(outcome.identity.as_ref().unwrap().cid, 962);
        assert_eq!(outcome.confidence_display.as_deref(), Some("80.00"));
        assert_eq!(
            outcome.pubchem_url.as_deref(),
            Some("https://pubchem.ncbi.nlm.nih.gov/compound/962")
        );
        assert_eq!(outcome.route.as_ref().unwrap().routes, vec!["dermal"]);
    }

    #[test]
    fn unresolved_name_terminates_first() {
        let processor = processor(MockDescriptorEngine::new(descriptors()));
        let outcome = processor.process("Fragrance");

        assert_eq!(outcome.status, IngredientStatus::SynonymNotFound);
        assert!(outcome.identity.is_none());
        assert!(outcome.pubchem_url.is_none());
        assert!(outcome.carcinogenicity.is_none());
    }

    #[test]
    fn missing_structure_keeps_identity_but_no_url() {
        let processor = processor(MockDescriptorEngine::new(descriptors()));
        let outcome = processor.process("phantom");

        assert_eq!(outcome.status, IngredientStatus::SmilesNotFound);
        assert_eq!(outcome.identity.as_ref().unwrap().cid, 404);
        assert!(outcome.pubchem_url.is_none());
    }

    #[test]
    fn descriptor_failure_carries_url() {
        let processor = processor(MockDescriptorEngine::failing());
        let outcome = processor.process("water");

        assert_eq!(outcome.status, IngredientStatus::DescriptorFailure);
        assert!(outcome.identity.is_some());
        assert!(outcome.pubchem_url.is_some());
        assert!(outcome.carcinogenicity.is_none());
    }

    #[test]
    fn classifier_load_failure_maps_to_prediction_failure() {
        let broken = ClassifierSet::new(
            Box::new(|| {
                Err(ModelError::ArtifactNotFound(PathBuf::from(
                    "ml_models/carcinogenicity.bin",
                )))
            }),
            Box::new(|| {
                Ok(Arc::new(MockRouteModel::new(FEATURES, &[], &[]))
                    as Arc<dyn crate::pipeline::models::RouteModel>)
            }),
        );
        let processor = IngredientProcessor::new(
            IdentityResolver::with_threshold(0.95),
            corpus(),
            Arc::new(MockDescriptorEngine::new(descriptors())),
            broken,
        );

        let outcome = processor.process("water");
        assert_eq!(outcome.status, IngredientStatus::PredictionFailure);
        assert!(outcome.pubchem_url.is_some());
    }

    #[test]
    fn corpus_fault_degrades_to_nearest_failure_state() {
        struct FaultyCorpus;
        impl crate::db::ChemicalCorpus for FaultyCorpus {
            fn for_each_synonym(
                &self,
                _visit: &mut dyn FnMut(&str, i64),
            ) -> Result<(), DatabaseError> {
                Err(DatabaseError::ConnectionPoisoned)
            }
            fn smiles_by_cid(&self, _cid: i64) -> Result<Option<String>, DatabaseError> {
                Err(DatabaseError::ConnectionPoisoned)
            }
        }

        let processor = IngredientProcessor::new(
            IdentityResolver::with_threshold(0.95),
            Arc::new(FaultyCorpus),
            Arc::new(MockDescriptorEngine::new(descriptors())),
            classifiers(),
        );
        let outcome = processor.process("water");
        assert_eq!(outcome.status, IngredientStatus::SynonymNotFound);
    }

    #[test]
    fn batch_preserves_order_and_count() {
        let processor = processor(MockDescriptorEngine::new(descriptors()));
        let names = vec![
            "Water".to_string(),
            "Fragrance".to_string(),
            "phantom".to_string(),
        ];
        let outcomes = processor.process_all(&names);

        assert_eq!(outcomes.len(), names.len());
        for (name, outcome) in names.iter().zip(&outcomes) {
            assert_eq!(&outcome.name, name);
        }
        assert_eq!(outcomes[0].status, IngredientStatus::Success);
        assert_eq!(outcomes[1].status, IngredientStatus::SynonymNotFound);
        assert_eq!(outcomes[2].status, IngredientStatus::SmilesNotFound);
    }

    #[test]
    fn one_failure_never_short_circuits_the_batch() {
        let processor = processor(MockDescriptorEngine::new(descriptors()));
        let names = vec!["unknown-a".to_string(), "Water".to_string()];
        let outcomes = processor.process_all(&names);

        assert_eq!(outcomes[0].status, IngredientStatus::SynonymNotFound);
        assert_eq!(outcomes[1].status, IngredientStatus::Success);
    }
}
