//! End-to-end pipeline tests.
//!
//! Each test builds a real PDF, runs the full pipeline on it and checks
//! the text layer of the output.

mod common;

use common::{assert_all_redacted, assert_preserved, assert_redacted, assert_valid_pdf};
use pii_redactor::{RedactError, RedactionConfig, RedactionPipeline};
use tempfile::TempDir;

fn pipeline() -> RedactionPipeline {
    RedactionPipeline::new(&RedactionConfig::default()).expect("pipeline init")
}

#[test]
fn test_person_and_email_both_redacted() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("contact.pdf");
    let output = dir.path().join("redacted_contact.pdf");
    common::create_pdf_with_lines(
        &input,
        &["Contact John Smith at john.smith@example.com"],
    )
    .unwrap();

    let report = pipeline().run(&input, &output).unwrap();

    assert!(report.instances_redacted >= 2);
    assert_valid_pdf(&output);
    assert_all_redacted(&output, &["John Smith", "john.smith@example.com"]);
    // Non-PII text around the removed regions survives.
    assert_preserved(&output, "Contact");
}

#[test]
fn test_repeated_phone_removes_every_occurrence() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("phones.pdf");
    let output = dir.path().join("redacted_phones.pdf");
    common::create_pdf_with_lines(
        &input,
        &["Call +1-202-555-0143", "Fax +1-202-555-0143"],
    )
    .unwrap();

    let report = pipeline().run(&input, &output).unwrap();

    // Two visual occurrences means two removed regions, not one.
    assert_eq!(report.instances_redacted, 2);
    assert_eq!(common::count_pattern_in_pdf(&output, "202-555-0143").unwrap(), 0);
}

#[test]
fn test_idempotent_second_run_finds_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("once.pdf");
    let output1 = dir.path().join("redacted_once.pdf");
    let output2 = dir.path().join("redacted_twice.pdf");
    common::create_pdf_with_lines(&input, &["Reach me at jane.doe@example.com"]).unwrap();

    let p = pipeline();
    let first = p.run(&input, &output1).unwrap();
    assert!(first.instances_redacted >= 1);

    // The literal is physically gone, so a second pass has nothing to do.
    let second = p.run(&output1, &output2).unwrap();
    assert_eq!(second.instances_redacted, 0);
    assert_redacted(&output2, "jane.doe@example.com");
}

#[test]
fn test_clean_page_round_trips_unchanged() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("clean.pdf");
    let output = dir.path().join("redacted_clean.pdf");
    common::create_pdf_with_lines(&input, &["nothing sensitive in these lowercase words"])
        .unwrap();

    let report = pipeline().run(&input, &output).unwrap();

    assert_eq!(report.instances_redacted, 0);
    assert_eq!(report.pages_modified, 0);
    assert_preserved(&output, "nothing sensitive in these lowercase words");
}

#[test]
fn test_blank_page_is_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("blank.pdf");
    let output = dir.path().join("redacted_blank.pdf");
    // Page 1 has content, page 2 is blank.
    common::TestPdfBuilder::new()
        .with_line("Invoice for services rendered")
        .with_new_page()
        .build(&input)
        .unwrap();

    let report = pipeline().run(&input, &output).unwrap();

    assert_eq!(report.pages_processed, 2);
    assert_eq!(report.pages_skipped, 1);
    assert_valid_pdf(&output);
}

#[test]
fn test_malformed_input_rejected_before_extraction() {
    let dir = TempDir::new().unwrap();
    let bogus = dir.path().join("fake.pdf");
    let output = dir.path().join("redacted_fake.pdf");
    std::fs::write(&bogus, b"this is merely a text file").unwrap();

    let err = pipeline().run(&bogus, &output).unwrap_err();

    assert!(matches!(err, RedactError::UnsupportedInput { .. }));
    // No partial artifact is ever published.
    assert!(!output.exists());
}

#[test]
fn test_ssn_and_ip_redacted_together() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("mixed.pdf");
    let output = dir.path().join("redacted_mixed.pdf");
    common::create_pdf_with_lines(
        &input,
        &["SSN 078-05-1120 logged from 192.168.10.77"],
    )
    .unwrap();

    pipeline().run(&input, &output).unwrap();

    assert_all_redacted(&output, &["078-05-1120", "192.168.10.77"]);
    assert_preserved(&output, "logged");
}
