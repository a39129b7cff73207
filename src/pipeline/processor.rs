//! Product analysis entry point. Drives the full pipeline:
//! OCR → normalize → segment → per-ingredient orchestration → aggregate.
//!
//! Trait-based DI for every external collaborator, so the whole run is
//! testable against mocks. Per-ingredient failures surface as statuses
//! inside the report; only the three request-fatal conditions error.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AnalysisConfig;
use crate::db::ChemicalCorpus;

use super::aggregate::{aggregate, HazardVerdict};
use super::classify::ClassifierSet;
use super::descriptors::DescriptorEngine;
use super::ocr::OcrEngine;
use super::orchestrator::IngredientProcessor;
use super::resolve::IdentityResolver;
use super::segment::{normalize_text, segment};
use super::types::IngredientOutcome;
use super::PipelineError;

/// Everything one analysis run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductReport {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    /// Normalized text the OCR engine extracted.
    pub ocr_text: String,
    /// Candidate ingredient names in label order.
    pub candidate_names: Vec<String>,
    /// One outcome per candidate, same order; correlate by position.
    pub ingredients: Vec<IngredientOutcome>,
    pub verdict: HazardVerdict,
    pub processing_time_seconds: f64,
}

/// Composition root for the ingredient risk assessment pipeline.
pub struct ProductAnalyzer {
    ocr: Box<dyn OcrEngine>,
    ingredients: IngredientProcessor,
}

impl ProductAnalyzer {
    pub fn new(
        ocr: Box<dyn OcrEngine>,
        corpus: Arc<dyn ChemicalCorpus>,
        descriptors: Arc<dyn DescriptorEngine>,
        classifiers: ClassifierSet,
        config: AnalysisConfig,
    ) -> Self {
        let resolver = IdentityResolver::with_threshold(config.acceptance_threshold);
        Self {
            ocr,
            ingredients: IngredientProcessor::new(resolver, corpus, descriptors, classifiers),
        }
    }

    /// Analyze a photographed ingredient label.
    ///
    /// Fatal only when OCR faults, OCR yields no text, or segmentation
    /// yields no candidates from non-empty text.
    pub fn analyze_image(&self, image_bytes: &[u8]) -> Result<ProductReport, PipelineError> {
        let analysis_id = Uuid::new_v4();
        let started = Instant::now();
        let _span = tracing::info_span!("analyze_image", analysis = %analysis_id).entered();

        let raw_text = self
            .ocr
            .extract_text(image_bytes)
            .map_err(|e| PipelineError::OcrUnavailable(e.to_string()))?;

        self.run(analysis_id, started, &raw_text)
    }

    /// Analyze already-extracted text (the image path after OCR, and the
    /// directly testable surface).
    pub fn analyze_text(&self, raw_text: &str) -> Result<ProductReport, PipelineError> {
        let analysis_id = Uuid::new_v4();
        let started = Instant::now();
        let _span = tracing::info_span!("analyze_text", analysis = %analysis_id).entered();

        self.run(analysis_id, started, raw_text)
    }

    fn run(
        &self,
        analysis_id: Uuid,
        started: Instant,
        raw_text: &str,
    ) -> Result<ProductReport, PipelineError> {
        let text = normalize_text(raw_text);
        if text.is_empty() {
            return Err(PipelineError::NoTextExtracted);
        }

        let candidate_names = segment(&text);
        if candidate_names.is_empty() {
            return Err(PipelineError::NoCandidatesParsed);
        }
        tracing::info!(candidates = candidate_names.len(), "Label segmented");

        let ingredients = self.ingredients.process_all(&candidate_names);
        debug_assert_eq!(ingredients.len(), candidate_names.len());

        let verdict = aggregate(&ingredients);
        let processing_time_seconds =
            (started.elapsed().as_secs_f64() * 100.0).round() / 100.0;
        tracing::info!(
            tier = %verdict.hazard_tier,
            seconds = processing_time_seconds,
            "Analysis complete"
        );

        Ok(ProductReport {
            analysis_id,
            analyzed_at: Utc::now(),
            ocr_text: text,
            candidate_names,
            ingredients,
            verdict,
            processing_time_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryCorpus;
    use crate::pipeline::descriptors::MockDescriptorEngine;
    use crate::pipeline::models::{MockCarcinogenicityModel, MockRouteModel};
    use crate::pipeline::ocr::{FailingOcrEngine, MockOcrEngine};
    use crate::pipeline::types::{DescriptorMap, IngredientStatus};

    const FEATURES: &[&str] = &["MolWt", "LogP"];

    fn descriptors() -> DescriptorMap {
        [("MolWt", 92.0), ("LogP", -1.7)]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    fn corpus() -> Arc<InMemoryCorpus> {
        Arc::new(
            InMemoryCorpus::new()
                .with_compound(962, "O", &["water"])
                .with_compound(753, "C(C(CO)O)O", &["glycerin"]),
        )
    }

    fn analyzer(ocr: Box<dyn OcrEngine>, group: &str, probability: f64) -> ProductAnalyzer {
        let classifiers = ClassifierSet::preloaded(
            Arc::new(MockCarcinogenicityModel::new(
                FEATURES,
                group,
                &[(group, probability)],
            )),
            Arc::new(MockRouteModel::new(
                FEATURES,
                &["oral"],
                &[("oral", 0.85)],
            )),
        );
        ProductAnalyzer::new(
            ocr,
            corpus(),
            Arc::new(MockDescriptorEngine::new(descriptors())),
            classifiers,
            AnalysisConfig::default(),
        )
    }

    #[test]
    fn segments_the_label_into_three_candidates() {
        let analyzer = analyzer(
            Box::new(MockOcrEngine::new("Water, Glycerin; Fragrance")),
            "Group 3",
            0.60,
        );
        let report = analyzer.analyze_image(b"label.jpg").unwrap();

        assert_eq!(
            report.candidate_names,
            vec!["Water", "Glycerin", "Fragrance"]
        );
        assert_eq!(report.ingredients.len(), 3);
        for (name, outcome) in report.candidate_names.iter().zip(&report.ingredients) {
            assert_eq!(&outcome.name, name);
        }
    }

    #[test]
    fn unknown_ingredient_gets_status_not_error() {
        let analyzer = analyzer(
            Box::new(MockOcrEngine::new("water, unobtainium")),
            "Group 3",
            0.60,
        );
        let report = analyzer.analyze_image(b"label.jpg").unwrap();

        assert_eq!(report.ingredients[0].status, IngredientStatus::Success);
        assert_eq!(
            report.ingredients[1].status,
            IngredientStatus::SynonymNotFound
        );
        assert!(report.ingredients[1].identity.is_none());
    }

    #[test]
    fn ocr_fault_is_fatal() {
        let analyzer = analyzer(Box::new(FailingOcrEngine), "Group 3", 0.60);
        let result = analyzer.analyze_image(b"label.jpg");
        assert!(matches!(result, Err(PipelineError::OcrUnavailable(_))));
    }

    #[test]
    fn blank_ocr_text_is_fatal_and_distinct() {
        let analyzer = analyzer(Box::new(MockOcrEngine::new("   \n  ")), "Group 3", 0.60);
        let result = analyzer.analyze_image(b"label.jpg");
        assert!(matches!(result, Err(PipelineError::NoTextExtracted)));
    }

    #[test]
    fn undecipherable_text_is_fatal() {
        let analyzer = analyzer(Box::new(MockOcrEngine::new(",,;;..")), "Group 3", 0.60);
        let result = analyzer.analyze_image(b"label.jpg");
        assert!(matches!(result, Err(PipelineError::NoCandidatesParsed)));
    }

    #[test]
    fn verdict_reflects_worst_classified_ingredient() {
        let analyzer = analyzer(
            Box::new(MockOcrEngine::new("water, glycerin")),
            "Group 1",
            0.80,
        );
        let report = analyzer.analyze_image(b"label.jpg").unwrap();

        assert_eq!(report.verdict.highest_group.as_deref(), Some("Group 1"));
        assert_eq!(report.verdict.hazard_tier, "High");
        assert_eq!(report.verdict.confidence_percent, 80.0);
        assert_eq!(
            report.ingredients[0].confidence_display.as_deref(),
            Some("80.00")
        );
        assert_eq!(
            report.verdict.route_advice,
            vec!["Avoid ingestion. Wash hands thoroughly after handling."]
        );
    }

    #[test]
    fn all_unresolved_yields_neutral_verdict() {
        let analyzer = analyzer(
            Box::new(MockOcrEngine::new("mystery one, mystery two")),
            "Group 1",
            0.80,
        );
        let report = analyzer.analyze_image(b"label.jpg").unwrap();

        assert_eq!(report.verdict.highest_group, None);
        assert_eq!(report.verdict.hazard_tier, "Very Low");
        assert_eq!(report.verdict.confidence_percent, 0.0);
        assert!(report.verdict.route_advice.is_empty());
    }

    #[test]
    fn analyze_text_skips_ocr() {
        let analyzer = analyzer(Box::new(FailingOcrEngine), "Group 3", 0.60);
        let report = analyzer.analyze_text("Water, Glycerin").unwrap();
        assert_eq!(report.candidate_names.len(), 2);
    }

    #[test]
    fn report_records_timing_and_normalized_text() {
        let analyzer = analyzer(
            Box::new(MockOcrEngine::new("  WATER,\n glycerin ")),
            "Group 3",
            0.60,
        );
        let report = analyzer.analyze_image(b"label.jpg").unwrap();

        assert_eq!(report.ocr_text, "water, glycerin");
        assert!(report.processing_time_seconds >= 0.0);
    }

    #[test]
    fn report_serializes_with_status_strings() {
        let analyzer = analyzer(
            Box::new(MockOcrEngine::new("water, unobtainium")),
            "Group 2B",
            0.90,
        );
        let report = analyzer.analyze_image(b"label.jpg").unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["ingredients"][0]["status"], "Success");
        assert_eq!(
            json["ingredients"][1]["status"],
            "Synonym not found in database"
        );
        assert_eq!(json["verdict"]["highest_group"], "Group 2B");
    }
}
