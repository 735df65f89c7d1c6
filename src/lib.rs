//! PII detection and secure PDF redaction.
//!
//! This library finds personally-identifiable information in PDF
//! documents and permanently removes it from the rendered pages. It
//! combines statistical named-entity recognition with a configurable
//! regex rule set, and uses MuPDF's redaction API so removed content is
//! deleted from the content stream, not merely covered.
//!
//! # Features
//!
//! - **Multi-source detection**: NER models plus ordered regex rules
//!   (email, phone, SSN, card numbers and more), reconciled into one
//!   offset-ordered span list
//! - **Secure Redaction**: physically removes text (not a visual overlay)
//! - **Every occurrence**: a detected literal is redacted at every place
//!   it visually appears on a page
//! - **OCR fallback**: scanned pages are rasterized, contrast-enhanced
//!   and recognized with Tesseract before detection
//! - **Atomic output**: the sanitized copy is published only on success
//!
//! # Architecture
//!
//! - [`detect`]: NER models, regex rules, span reconciliation
//! - [`extract`]: per-page text acquisition with OCR fallback
//! - [`redaction`]: redaction strategies (region location and removal)
//! - [`pipeline`]: per-document orchestration
//! - [`service`]: output management and byte-level entry points
//! - [`config`]: label allow-list and rule-set configuration
//! - [`error`]: error taxonomy
//!
//! # Quick Start
//!
//! ```no_run
//! use pii_redactor::{RedactionConfig, RedactionPipeline};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RedactionConfig::default();
//! let pipeline = RedactionPipeline::new(&config)?;
//!
//! let report = pipeline.run(
//!     Path::new("input.pdf"),
//!     Path::new("redacted_input.pdf"),
//! )?;
//! println!("{} instances removed", report.instances_redacted);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod detect;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod redaction;
pub mod service;

pub use config::{FillColor, RedactionConfig, DEFAULT_LABELS};
pub use detect::{
    reconcile, DetectedSpan, EntityDetector, ModelRegistry, RedactionRule, RuleSet, SpanSource,
};
pub use error::{RedactError, RedactResult};
pub use extract::{OcrEngine, TextExtractor};
pub use pipeline::{PipelineReport, RedactionPipeline};
pub use redaction::{
    PagePlan, RedactionOutcome, RedactionRegion, RedactionStrategy, SecureRedactionStrategy,
};
pub use service::{RedactionService, OUTPUT_PREFIX};

use std::path::Path;

/// Extracts the whole text layer of a PDF.
///
/// Convenience wrapper used by the CLI `extract` subcommand and by test
/// assertions that check what remains readable after redaction.
pub fn extract_text_from_pdf(path: &Path) -> RedactResult<String> {
    let bytes = std::fs::read(path).map_err(|e| RedactError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| RedactError::TextExtraction {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
