use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("OCR engine initialization failed: {0}")]
    Init(String),

    #[error("OCR processing failed: {0}")]
    Processing(String),
}

/// OCR engine abstraction. The concrete engine lives outside this crate;
/// the pipeline only requires text out of image bytes, with failure
/// distinguishable from an empty page.
pub trait OcrEngine: Send + Sync {
    fn extract_text(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

/// Mock OCR engine for unit testing without a real model.
pub struct MockOcrEngine {
    text: String,
}

impl MockOcrEngine {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn extract_text(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

/// OCR engine that always faults (for top-level failure tests).
pub struct FailingOcrEngine;

impl OcrEngine for FailingOcrEngine {
    fn extract_text(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Err(OcrError::Processing("engine offline".into()))
    }
}
