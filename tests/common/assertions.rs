//! Custom assertions for PDF redaction testing.

use std::path::Path;

/// Asserts that a literal has been removed from a PDF's text layer.
///
/// # Panics
/// Panics if the literal is still extractable from the PDF.
pub fn assert_redacted(pdf_path: &Path, literal: &str) {
    let text = extract_text_or_panic(pdf_path);
    assert!(
        !text.contains(literal),
        "'{}' should be redacted but is still extractable from '{}' ({} chars of text)",
        literal,
        pdf_path.display(),
        text.len()
    );
}

/// Asserts that a literal survived redaction untouched.
///
/// # Panics
/// Panics if the literal is not found in the PDF.
pub fn assert_preserved(pdf_path: &Path, literal: &str) {
    let text = extract_text_or_panic(pdf_path);
    assert!(
        text.contains(literal),
        "'{}' should be preserved but was not found in '{}'",
        literal,
        pdf_path.display()
    );
}

/// Asserts that every given literal has been removed.
pub fn assert_all_redacted(pdf_path: &Path, literals: &[&str]) {
    let text = extract_text_or_panic(pdf_path);
    let still_present: Vec<&str> = literals
        .iter()
        .copied()
        .filter(|l| text.contains(l))
        .collect();
    assert!(
        still_present.is_empty(),
        "the following literals should be redacted but were found: {:?}",
        still_present
    );
}

/// Asserts that a PDF exists, is non-empty and structurally loadable.
pub fn assert_valid_pdf(pdf_path: &Path) {
    assert!(
        pdf_path.exists(),
        "PDF should exist at '{}'",
        pdf_path.display()
    );
    let metadata = std::fs::metadata(pdf_path).expect("Failed to get PDF metadata");
    assert!(
        metadata.len() > 0,
        "PDF should not be empty at '{}'",
        pdf_path.display()
    );
    assert!(
        ::lopdf::Document::load(pdf_path).is_ok(),
        "PDF should be structurally valid at '{}'",
        pdf_path.display()
    );
}

fn extract_text_or_panic(pdf_path: &Path) -> String {
    pii_redactor::extract_text_from_pdf(pdf_path).unwrap_or_else(|e| {
        panic!(
            "Failed to extract text from PDF '{}': {}",
            pdf_path.display(),
            e
        )
    })
}
