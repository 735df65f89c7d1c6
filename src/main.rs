//! PII redaction CLI.
//!
//! Detects and permanently removes personally-identifiable information
//! from PDF documents. Use the `extract` subcommand to inspect the text
//! the detector would see.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use pii_redactor::{detect, OcrEngine, RedactionConfig, RedactionPipeline, TextExtractor};

/// PDF PII Redaction Tool
///
/// Detects names, contact details, identifiers and other PII and
/// removes them irreversibly from the rendered pages.
#[derive(Parser)]
#[command(name = "pii-redactor")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input PDF file path
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output PDF file path (defaults to redacted_<input name>)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Rule/label configuration file (TOML); built-in defaults otherwise
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// NER labels to redact (overrides the configured allow-list)
    #[arg(short, long, value_name = "LABEL")]
    label: Vec<String>,

    /// Tesseract language spec for the OCR fallback (e.g. "eng+hin")
    #[arg(long, value_name = "LANG", default_value = "eng")]
    ocr_lang: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a PDF (for debugging and verification)
    Extract {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output text file (optional, defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn load_config(cli: &Cli) -> Result<RedactionConfig> {
    let mut config = match &cli.config {
        Some(path) => RedactionConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => RedactionConfig::default(),
    };
    if !cli.label.is_empty() {
        config.labels = cli.label.clone();
    }
    Ok(config)
}

fn run_redaction(cli: &Cli, input: &Path) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let config = load_config(cli)?;
    let ocr = OcrEngine {
        language: cli.ocr_lang.clone(),
        ..OcrEngine::default()
    };
    let pipeline = RedactionPipeline::new(&config)
        .context("Failed to initialize pipeline")?
        .with_extractor(TextExtractor::with_ocr(ocr));

    let output = match &cli.output {
        Some(path) => path.clone(),
        None => default_output_path(input)?,
    };

    if cli.verbose {
        println!("Input:  {}", input.display());
        println!("Output: {}", output.display());
        println!("Labels: {}", config.labels.join(", "));
        println!("Rules:  {} rule(s)", config.rules.len());
    }

    let report = pipeline.run(input, &output).context("Redaction failed")?;

    if cli.verbose {
        println!("\nRedaction Summary:");
        println!("  Pages processed: {}", report.pages_processed);
        println!("  Pages modified:  {}", report.pages_modified);
        println!("  Pages skipped:   {}", report.pages_skipped);
        println!("  Instances redacted: {}", report.instances_redacted);
        println!(
            "  Secure: {}",
            if report.secure { "Yes" } else { "No (visual only)" }
        );
    }

    if report.instances_redacted > 0 {
        println!(
            "✓ Removed {} instance(s) → {}",
            report.instances_redacted,
            report.output.display()
        );
    } else {
        println!("⚠ No PII found to redact; output is an unmodified copy");
    }

    Ok(())
}

fn run_extract(input: &Path, output: Option<&Path>) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let text = pii_redactor::extract_text_from_pdf(input).context("Text extraction failed")?;

    if let Some(output_path) = output {
        std::fs::write(output_path, &text)
            .with_context(|| format!("Failed to write to {}", output_path.display()))?;
        println!(
            "✓ Extracted {} characters → {}",
            text.len(),
            output_path.display()
        );
    } else {
        println!("{}", text);
    }

    Ok(())
}

/// `report.pdf` becomes `redacted_report.pdf` next to the input.
fn default_output_path(input: &Path) -> Result<PathBuf> {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Input filename is not valid UTF-8"))?;
    let output_name = pii_redactor::RedactionService::output_name(name);
    Ok(match input.parent() {
        Some(dir) => dir.join(output_name),
        None => PathBuf::from(output_name),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Fail fast: a process without its models must not accept work.
    detect::ner::init().context("Failed to load NER models")?;

    match &cli.command {
        Some(Commands::Extract { input, output }) => {
            run_extract(input, output.as_deref())?;
        }
        None => {
            let input = cli
                .input
                .clone()
                .ok_or_else(|| anyhow::anyhow!("--input is required"))?;
            run_redaction(&cli, &input)?;
        }
    }

    Ok(())
}
