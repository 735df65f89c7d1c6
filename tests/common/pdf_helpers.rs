//! PDF inspection helpers.

use anyhow::Result;
use std::path::Path;

/// Extracts text from a PDF safely, returning an error instead of panicking.
pub fn extract_text(pdf_path: &Path) -> Result<String> {
    pii_redactor::extract_text_from_pdf(pdf_path)
        .map_err(|e| anyhow::anyhow!("Failed to extract text: {}", e))
}

/// Counts occurrences of a literal in a PDF's text layer.
pub fn count_pattern_in_pdf(pdf_path: &Path, pattern: &str) -> Result<usize> {
    let text = extract_text(pdf_path)?;
    Ok(text.matches(pattern).count())
}

/// Checks if a PDF contains any of the given literals.
pub fn pdf_contains_any(pdf_path: &Path, patterns: &[&str]) -> Result<bool> {
    let text = extract_text(pdf_path)?;
    Ok(patterns.iter().any(|p| text.contains(p)))
}

/// Checks if a PDF contains all of the given literals.
pub fn pdf_contains_all(pdf_path: &Path, patterns: &[&str]) -> Result<bool> {
    let text = extract_text(pdf_path)?;
    Ok(patterns.iter().all(|p| text.contains(p)))
}

/// Validates that a PDF is loadable and has basic structure.
pub fn is_valid_pdf(pdf_path: &Path) -> bool {
    ::lopdf::Document::load(pdf_path).is_ok()
}
