pub mod aggregate;
pub mod align;
pub mod classify;
pub mod descriptors;
pub mod models;
pub mod ocr;
pub mod orchestrator;
pub mod processor;
pub mod resolve;
pub mod segment;
pub mod types;

pub use aggregate::*;
pub use align::*;
pub use classify::*;
pub use orchestrator::*;
pub use processor::*;
pub use resolve::*;
pub use segment::*;
pub use types::*;

use thiserror::Error;

/// Request-fatal pipeline failures. Per-ingredient failures are never
/// errors; they are recorded as an [`types::IngredientStatus`] on the
/// ingredient's outcome and the batch continues.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),

    #[error("No text could be extracted from the image")]
    NoTextExtracted,

    #[error("No ingredient names could be parsed from the extracted text")]
    NoCandidatesParsed,
}
