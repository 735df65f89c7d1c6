//! Per-page text acquisition.
//!
//! The digital text layer is authoritative when present: it is read
//! verbatim, so regex offsets are byte-faithful. Pages without a text
//! layer (scans) fall back to OCR. A page that yields nothing on both
//! paths carries no textual PII as far as this pipeline is concerned;
//! the caller logs and skips it.

pub mod ocr;

pub use ocr::OcrEngine;

use std::path::Path;

use mupdf::Page;
use tracing::warn;

use crate::error::{RedactError, RedactResult};

/// Extracts plain text for one page, OCR fallback included.
pub struct TextExtractor {
    ocr: OcrEngine,
}

impl TextExtractor {
    pub fn new() -> Self {
        Self {
            ocr: OcrEngine::default(),
        }
    }

    pub fn with_ocr(ocr: OcrEngine) -> Self {
        Self { ocr }
    }

    /// Returns the page's text, or an empty string when neither the
    /// digital layer nor OCR yields anything usable.
    ///
    /// OCR tool failures degrade to an empty result (logged) rather than
    /// failing the document: a page we cannot read is treated exactly
    /// like a blank page.
    pub fn extract(&self, doc_path: &Path, page: &Page, index: usize) -> RedactResult<String> {
        let digital = page
            .to_text()
            .map_err(|e| RedactError::TextExtraction {
                path: doc_path.to_path_buf(),
                reason: format!("page {}: {}", index + 1, e),
            })?;
        if !digital.trim().is_empty() {
            return Ok(digital);
        }

        match self.ocr.recognize_page(doc_path, index) {
            Ok(text) => Ok(text),
            Err(err) => {
                warn!(page = index + 1, %err, "ocr fallback failed; treating page as empty");
                Ok(String::new())
            }
        }
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}
