//! Service layer consumed by external callers (HTTP front end, CLI).
//!
//! Owns the output directory and the deterministic output naming scheme:
//! an input named `report.pdf` always produces `redacted_report.pdf`.
//! Byte-oriented entry points exist for callers that hold uploads in
//! memory; retrieval by name answers `NotFound` for absent artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RedactError, RedactResult};
use crate::pipeline::{PipelineReport, RedactionPipeline};

/// Prefix prepended to every output filename.
pub const OUTPUT_PREFIX: &str = "redacted_";

/// PDF redaction service with a persistent output directory.
pub struct RedactionService {
    pipeline: RedactionPipeline,
    output_dir: PathBuf,
}

impl RedactionService {
    pub fn new(pipeline: RedactionPipeline, output_dir: impl Into<PathBuf>) -> RedactResult<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| RedactError::Io {
            path: output_dir.clone(),
            source: e,
        })?;
        Ok(Self {
            pipeline,
            output_dir,
        })
    }

    /// Derives the output filename for an input filename.
    pub fn output_name(input_name: &str) -> String {
        format!("{}{}", OUTPUT_PREFIX, input_name)
    }

    /// Redacts a PDF file into the service's output directory.
    pub fn redact_file(&self, input: &Path) -> RedactResult<PipelineReport> {
        let name = input
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| RedactError::InvalidInput {
                parameter: "input".to_string(),
                reason: "missing or non-UTF-8 filename".to_string(),
            })?;
        require_pdf_name(name)?;
        let output = self.output_dir.join(Self::output_name(name));
        self.pipeline.run(input, &output)
    }

    /// Redacts an in-memory PDF, returning the sanitized bytes.
    ///
    /// The artifact is also kept in the output directory under the
    /// derived name, retrievable via [`fetch_output`](Self::fetch_output).
    pub fn redact_bytes(&self, filename: &str, bytes: &[u8]) -> RedactResult<Vec<u8>> {
        let name = sanitize_name(filename)?;
        require_pdf_name(&name)?;

        let upload_dir = tempfile::TempDir::new().map_err(|e| RedactError::Io {
            path: std::env::temp_dir(),
            source: e,
        })?;
        let input = upload_dir.path().join(&name);
        fs::write(&input, bytes).map_err(|e| RedactError::Io {
            path: input.clone(),
            source: e,
        })?;

        let report = self.pipeline.run(&input, &self.output_dir.join(Self::output_name(&name)))?;
        fs::read(&report.output).map_err(|e| RedactError::Io {
            path: report.output.clone(),
            source: e,
        })
    }

    /// Retrieves a previously produced artifact by name.
    pub fn fetch_output(&self, name: &str) -> RedactResult<Vec<u8>> {
        let name = sanitize_name(name)?;
        let path = self.output_dir.join(&name);
        if !path.is_file() {
            return Err(RedactError::NotFound { name });
        }
        fs::read(&path).map_err(|e| RedactError::Io {
            path,
            source: e,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

fn require_pdf_name(name: &str) -> RedactResult<()> {
    if !name.to_ascii_lowercase().ends_with(".pdf") {
        return Err(RedactError::UnsupportedInput {
            reason: format!("only .pdf files are accepted, got '{}'", name),
        });
    }
    Ok(())
}

/// Restricts artifact names to bare filenames.
fn sanitize_name(name: &str) -> RedactResult<String> {
    let bare = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if bare.is_empty() || bare != name {
        return Err(RedactError::InvalidInput {
            parameter: "name".to_string(),
            reason: "must be a bare filename".to_string(),
        });
    }
    Ok(bare.to_string())
}
