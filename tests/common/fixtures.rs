//! Test fixtures and PDF builders.
//!
//! Builders for creating test PDFs with specific text content, following
//! the Builder pattern for clean test setup.

use anyhow::Result;
use printpdf::*;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Builder for creating test PDFs with custom content.
///
/// Each line is placed separately on the page so MuPDF's text search
/// sees one contiguous run per line. Pages without lines stay blank,
/// which is how the extraction-skip path gets exercised.
#[derive(Debug, Clone)]
pub struct TestPdfBuilder {
    title: String,
    pages: Vec<Vec<String>>,
    page_width: Mm,
    page_height: Mm,
}

impl TestPdfBuilder {
    pub fn new() -> Self {
        Self {
            title: "Test Document".to_string(),
            pages: vec![Vec::new()],
            page_width: Mm(210.0),  // A4
            page_height: Mm(297.0),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Adds a line of text to the current page.
    pub fn with_line(mut self, line: &str) -> Self {
        self.pages
            .last_mut()
            .expect("builder always has a page")
            .push(line.to_string());
        self
    }

    /// Starts a new page; subsequent lines land on it.
    pub fn with_new_page(mut self) -> Self {
        self.pages.push(Vec::new());
        self
    }

    /// Builds the PDF and writes it to `output_path`.
    pub fn build(self, output_path: &Path) -> Result<PathBuf> {
        let (doc, page1, layer1) =
            PdfDocument::new(&self.title, self.page_width, self.page_height, "Layer 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

        let mut page_indices = vec![(page1, layer1)];
        for _ in 1..self.pages.len() {
            page_indices.push(doc.add_page(self.page_width, self.page_height, "Layer 1"));
        }

        for ((page_idx, layer_idx), lines) in page_indices.into_iter().zip(&self.pages) {
            let layer = doc.get_page(page_idx).get_layer(layer_idx);
            let mut y = 270.0;
            for line in lines {
                layer.use_text(line, 12.0, Mm(20.0), Mm(y), &font);
                y -= 10.0;
            }
        }

        doc.save(&mut BufWriter::new(fs::File::create(output_path)?))?;
        Ok(output_path.to_path_buf())
    }
}

impl Default for TestPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-page PDF with the given lines.
pub fn create_pdf_with_lines(path: &Path, lines: &[&str]) -> Result<PathBuf> {
    let mut builder = TestPdfBuilder::new();
    for line in lines {
        builder = builder.with_line(line);
    }
    builder.build(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builder_pattern() {
        let builder = TestPdfBuilder::new()
            .with_title("Test")
            .with_line("one")
            .with_new_page()
            .with_line("two");
        assert_eq!(builder.pages.len(), 2);
    }

    #[test]
    fn test_create_pdf() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let pdf_path = temp_dir.path().join("test.pdf");
        create_pdf_with_lines(&pdf_path, &["hello world"])?;
        assert!(pdf_path.exists());
        Ok(())
    }
}
