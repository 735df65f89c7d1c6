//! Document-level orchestration.
//!
//! Sequences the pipeline for one document:
//! open -> per page (extract -> detect -> reconcile -> redact) -> save.
//!
//! A page that yields no text is skipped without aborting the document.
//! A failure to open or serialize the document aborts the whole run;
//! output is written to a temp file and published by rename only on
//! success, so callers never observe a partially-redacted artifact.
//!
//! Pages are processed strictly in order and each pipeline instance is
//! single-threaded. Independent documents may run on separate threads;
//! the only shared state is the read-only model registry.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use mupdf::pdf::PdfDocument;
use tracing::{debug, info, warn};

use crate::config::{FillColor, RedactionConfig};
use crate::detect::{self, EntityDetector, ModelRegistry, RuleSet};
use crate::error::{RedactError, RedactResult};
use crate::extract::TextExtractor;
use crate::redaction::{PagePlan, RedactionStrategy, SecureRedactionStrategy};

/// Text and geometry of one page, as consumed by detection.
#[derive(Debug, Clone)]
pub struct PageText {
    pub index: usize,
    pub text: String,
    pub width: f32,
    pub height: f32,
}

/// Result summary for one completed document run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub output: PathBuf,
    pub pages_processed: usize,
    pub pages_modified: usize,
    pub pages_skipped: usize,
    pub instances_redacted: usize,
    pub secure: bool,
}

/// The detection-and-redaction pipeline for whole documents.
pub struct RedactionPipeline {
    models: &'static ModelRegistry,
    rules: RuleSet,
    allowed_labels: HashSet<String>,
    fill: FillColor,
    extractor: TextExtractor,
    strategy: Box<dyn RedactionStrategy>,
}

impl RedactionPipeline {
    /// Builds a pipeline from configuration, loading the process-wide
    /// model registry on first use.
    pub fn new(config: &RedactionConfig) -> RedactResult<Self> {
        Ok(Self {
            models: detect::ner::init()?,
            rules: RuleSet::compile(&config.rules)?,
            allowed_labels: config.label_set(),
            fill: config.fill_color,
            extractor: TextExtractor::new(),
            strategy: Box::new(SecureRedactionStrategy::new()),
        })
    }

    pub fn with_extractor(mut self, extractor: TextExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_strategy(mut self, strategy: Box<dyn RedactionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Runs the full pipeline: `input` is left untouched, the sanitized
    /// copy is written to `output`.
    pub fn run(&self, input: &Path, output: &Path) -> RedactResult<PipelineReport> {
        validate_pdf_input(input)?;

        let input_str = input.to_str().ok_or_else(|| RedactError::InvalidInput {
            parameter: "input".to_string(),
            reason: "path contains invalid UTF-8".to_string(),
        })?;
        let doc = PdfDocument::open(input_str).map_err(|e| RedactError::UnsupportedInput {
            reason: format!("not a well-formed PDF: {}", e),
        })?;
        let page_count = doc
            .page_count()
            .map_err(|e| RedactError::UnsupportedInput {
                reason: format!("cannot read page count: {}", e),
            })? as usize;

        let detector = EntityDetector::new(self.models, &self.rules, &self.allowed_labels);
        let mut plan: Vec<PagePlan> = Vec::with_capacity(page_count);
        let mut pages_skipped = 0usize;

        for index in 0..page_count {
            let page_text = match self.extract_page(&doc, input, index) {
                Some(p) => p,
                None => {
                    pages_skipped += 1;
                    continue;
                }
            };
            if page_text.text.trim().is_empty() {
                warn!(page = index + 1, "no text found on page, skipping");
                pages_skipped += 1;
                continue;
            }

            let spans = detect::reconcile(detector.detect(&page_text.text));
            let literals = unique_literals(&spans);
            debug!(
                page = index + 1,
                spans = spans.len(),
                literals = literals.len(),
                "detection complete"
            );
            plan.push(PagePlan {
                page_index: index,
                literals,
            });
        }

        let outcome = self.strategy.apply(&doc, &plan, self.fill)?;
        save_atomic(&doc, output)?;

        info!(
            input = %input.display(),
            output = %output.display(),
            pages = outcome.pages_processed,
            modified = outcome.pages_modified,
            skipped = pages_skipped,
            instances = outcome.instances_redacted,
            "document redacted"
        );

        Ok(PipelineReport {
            output: output.to_path_buf(),
            pages_processed: outcome.pages_processed,
            pages_modified: outcome.pages_modified,
            pages_skipped,
            instances_redacted: outcome.instances_redacted,
            secure: outcome.secure,
        })
    }

    /// Extracts one page; returns None for the skipped sub-state.
    fn extract_page(&self, doc: &PdfDocument, input: &Path, index: usize) -> Option<PageText> {
        let page = match doc.load_page(index as i32) {
            Ok(p) => p,
            Err(e) => {
                warn!(page = index + 1, error = %e, "failed to load page, skipping");
                return None;
            }
        };
        let (width, height) = match page.bounds() {
            Ok(b) => (b.x1 - b.x0, b.y1 - b.y0),
            Err(_) => (0.0, 0.0),
        };
        match self.extractor.extract(input, &page, index) {
            Ok(text) => Some(PageText {
                index,
                text,
                width,
                height,
            }),
            Err(e) => {
                warn!(page = index + 1, error = %e, "text extraction failed, skipping page");
                None
            }
        }
    }
}

/// The literal strings to search for, in span order, deduplicated.
///
/// Reconciliation keeps overlapping spans with distinct labels; search
/// is text-driven, so the same literal only needs to be located once.
fn unique_literals(spans: &[detect::DetectedSpan]) -> Vec<String> {
    let mut seen = HashSet::new();
    spans
        .iter()
        .filter(|s| seen.insert(s.text.clone()))
        .map(|s| s.text.clone())
        .collect()
}

/// Rejects anything that is not a PDF before page processing starts.
fn validate_pdf_input(input: &Path) -> RedactResult<()> {
    let mut file = File::open(input).map_err(|e| RedactError::Io {
        path: input.to_path_buf(),
        source: e,
    })?;
    let mut magic = [0u8; 5];
    let n = file.read(&mut magic).map_err(|e| RedactError::Io {
        path: input.to_path_buf(),
        source: e,
    })?;
    if n < 5 || &magic != b"%PDF-" {
        return Err(RedactError::UnsupportedInput {
            reason: format!("'{}' does not start with a PDF header", input.display()),
        });
    }
    Ok(())
}

/// Serializes the document to a temp file in the output directory and
/// publishes it by rename only after the write succeeded.
fn save_atomic(doc: &PdfDocument, output: &Path) -> RedactResult<()> {
    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = tempfile::Builder::new()
        .prefix(".redact-")
        .suffix(".pdf")
        .tempfile_in(dir)
        .map_err(|e| RedactError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
    let tmp_str = tmp
        .path()
        .to_str()
        .ok_or_else(|| RedactError::InvalidInput {
            parameter: "output".to_string(),
            reason: "temp path contains invalid UTF-8".to_string(),
        })?;

    doc.save(tmp_str).map_err(|e| RedactError::RedactionApply {
        message: "failed to serialize document".to_string(),
        page: None,
        source: Some(Box::new(e)),
    })?;

    tmp.persist(output).map_err(|e| RedactError::Io {
        path: output.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{DetectedSpan, SpanSource};

    #[test]
    fn test_unique_literals_preserves_order() {
        let text = "a@b.io x a@b.io y Ann Lee";
        let spans = vec![
            DetectedSpan::new(text, 0, 6, "email", SpanSource::Rule).unwrap(),
            DetectedSpan::new(text, 9, 15, "email", SpanSource::Rule).unwrap(),
            DetectedSpan::new(text, 18, 25, "PERSON", SpanSource::Ner).unwrap(),
        ];
        let literals = unique_literals(&spans);
        assert_eq!(literals, vec!["a@b.io".to_string(), "Ann Lee".to_string()]);
    }

    #[test]
    fn test_non_pdf_rejected_before_processing() {
        let dir = tempfile::TempDir::new().unwrap();
        let bogus = dir.path().join("not_a.pdf");
        std::fs::write(&bogus, b"hello world, definitely not a pdf").unwrap();
        let err = validate_pdf_input(&bogus).unwrap_err();
        assert!(matches!(err, RedactError::UnsupportedInput { .. }));
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let err = validate_pdf_input(Path::new("/nonexistent/input.pdf")).unwrap_err();
        assert!(matches!(err, RedactError::Io { .. }));
    }
}
