//! Identity resolution: approximate matching of a candidate ingredient
//! name against the synonym corpus.

use crate::db::{ChemicalCorpus, DatabaseError};

use super::types::ChemicalIdentity;

/// Normalized string similarity, bounded to [0, 1]. A trait seam so the
/// concrete metric is swappable without touching threshold or tie-break
/// logic.
pub trait Similarity: Send + Sync {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Jaro-Winkler similarity, the default metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl Similarity for JaroWinkler {
    fn score(&self, a: &str, b: &str) -> f64 {
        strsim::jaro_winkler(a, b)
    }
}

/// Resolves a candidate name to the best-scoring corpus synonym.
///
/// The acceptance threshold is strict on purpose: a false-positive match
/// substitutes the wrong chemical's toxicology profile downstream.
pub struct IdentityResolver {
    similarity: Box<dyn Similarity>,
    threshold: f64,
}

impl IdentityResolver {
    pub fn new(similarity: Box<dyn Similarity>, threshold: f64) -> Self {
        Self {
            similarity,
            threshold,
        }
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self::new(Box::new(JaroWinkler), threshold)
    }

    /// Single scan over the corpus: score every synonym against the
    /// lowercased candidate, keep the best, accept it only if it clears
    /// the threshold. An equal top score is broken by the lowest CID:
    /// the corpus contains duplicate synonyms mapped to different
    /// identities, and resolution must be deterministic.
    pub fn resolve(
        &self,
        corpus: &dyn ChemicalCorpus,
        name: &str,
    ) -> Result<Option<ChemicalIdentity>, DatabaseError> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }

        let mut best: Option<ChemicalIdentity> = None;
        corpus.for_each_synonym(&mut |synonym, cid| {
            let score = self.similarity.score(&needle, &synonym.to_lowercase());
            let replace = match &best {
                None => true,
                Some(current) => {
                    score > current.similarity_score
                        || (score == current.similarity_score && cid < current.cid)
                }
            };
            if replace {
                best = Some(ChemicalIdentity {
                    cid,
                    matched_synonym: synonym.to_string(),
                    similarity_score: score,
                });
            }
        })?;

        match best {
            Some(identity) if identity.similarity_score >= self.threshold => {
                tracing::debug!(
                    candidate = name,
                    matched = identity.matched_synonym,
                    cid = identity.cid,
                    score = identity.similarity_score,
                    "Synonym match accepted"
                );
                Ok(Some(identity))
            }
            _ => Ok(None),
        }
    }
}
