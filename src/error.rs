//! Error types for the PII redaction library.
//!
//! Errors are categorized by where they occur in the pipeline and by
//! whether they are fatal for the process, fatal for a single document,
//! or recoverable. Per-page problems (an empty scanned page, a literal
//! with zero search hits) are never surfaced through this type; they are
//! logged and skipped inside the pipeline. Callers see either a complete
//! redacted document or exactly one of these errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for redaction operations.
pub type RedactResult<T> = Result<T, RedactError>;

/// Error type covering every failure a caller can observe.
#[derive(Debug, Error)]
pub enum RedactError {
    /// A required NER model failed to load at process start.
    ///
    /// Fatal: the process must not accept requests in this state.
    #[error("NER model '{name}' unavailable: {reason}")]
    ModelUnavailable { name: String, reason: String },

    /// Input is not a well-formed PDF (or not a PDF at all).
    ///
    /// Raised before any page processing is attempted.
    #[error("unsupported input: {reason}")]
    UnsupportedInput { reason: String },

    /// The page engine could not commit removals or serialize the
    /// document. Fatal for the document: no partial output is published.
    #[error("redaction apply failure{}: {message}", page_label(.page))]
    RedactionApply {
        message: String,
        page: Option<usize>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Retrieval of an output artifact that does not exist.
    #[error("output not found: {name}")]
    NotFound { name: String },

    /// Reading or writing a file failed.
    #[error("io error for '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A redaction rule pattern failed to compile.
    #[error("invalid pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    /// Whole-document text extraction failed.
    #[error("text extraction failed for '{}': {reason}", .path.display())]
    TextExtraction { path: PathBuf, reason: String },

    /// OCR tooling failed or produced unusable output.
    #[error("ocr failed: {0}")]
    Ocr(String),

    /// Invalid configuration or parameters.
    #[error("invalid input for '{parameter}': {reason}")]
    InvalidInput { parameter: String, reason: String },
}

fn page_label(page: &Option<usize>) -> String {
    match page {
        Some(p) => format!(" on page {}", p),
        None => String::new(),
    }
}

impl From<regex::Error> for RedactError {
    fn from(err: regex::Error) -> Self {
        Self::Pattern {
            pattern: "<unknown>".to_string(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RedactError::NotFound {
            name: "redacted_report.pdf".to_string(),
        };
        assert_eq!(err.to_string(), "output not found: redacted_report.pdf");
    }

    #[test]
    fn test_apply_failure_includes_page() {
        let err = RedactError::RedactionApply {
            message: "cannot commit".to_string(),
            page: Some(3),
            source: None,
        };
        assert_eq!(
            err.to_string(),
            "redaction apply failure on page 3: cannot commit"
        );
    }
}
