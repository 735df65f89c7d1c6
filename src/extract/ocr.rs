//! OCR fallback for scanned pages.
//!
//! Rasterizes a single page with `pdftoppm`, preprocesses the image
//! (grayscale plus contrast enhancement) and recognizes text with the
//! `tesseract` CLI. Scratch files live in a per-call temp directory.
//!
//! OCR output offsets never correspond to digital-layer coordinates;
//! callers must treat the text as detection input only and localize
//! matches by content search on the rendered page.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::debug;

use crate::error::{RedactError, RedactResult};

/// Returns true when an external binary can be invoked.
fn binary_available(name: &str) -> bool {
    Command::new(name)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// OCR engine configuration and invocation.
#[derive(Debug, Clone)]
pub struct OcrEngine {
    /// Tesseract language spec, e.g. `"eng"` or `"eng+hin"`.
    pub language: String,
    /// Rasterization resolution.
    pub dpi: u32,
    /// Contrast adjustment passed to the image preprocessor.
    pub contrast: f32,
}

impl Default for OcrEngine {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            dpi: 300,
            contrast: 32.0,
        }
    }
}

impl OcrEngine {
    /// Whether both external tools are installed.
    pub fn is_available() -> bool {
        binary_available("tesseract") && binary_available("pdftoppm")
    }

    /// Recognizes text on one page (zero-based index) of a PDF.
    pub fn recognize_page(&self, pdf_path: &Path, page_index: usize) -> RedactResult<String> {
        let scratch = TempDir::new().map_err(|e| RedactError::Io {
            path: std::env::temp_dir(),
            source: e,
        })?;
        let page_number = page_index + 1;
        let raster = self.rasterize(pdf_path, page_number, scratch.path())?;
        let enhanced = self.enhance(&raster, scratch.path())?;
        let text = self.run_tesseract(&enhanced)?;
        debug!(page = page_number, chars = text.len(), "ocr complete");
        Ok(text)
    }

    fn rasterize(&self, pdf_path: &Path, page_number: usize, dir: &Path) -> RedactResult<PathBuf> {
        let page_str = page_number.to_string();
        let prefix = dir.join("page");

        let status = Command::new("pdftoppm")
            .args(["-png", "-r", &self.dpi.to_string()])
            .args(["-f", &page_str, "-l", &page_str])
            .arg(pdf_path)
            .arg(&prefix)
            .status();

        match status {
            Ok(s) if s.success() => find_page_image(dir, page_number).ok_or_else(|| {
                RedactError::Ocr(format!("pdftoppm produced no image for page {}", page_number))
            }),
            Ok(_) => Err(RedactError::Ocr(
                "pdftoppm failed to rasterize page".to_string(),
            )),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(RedactError::Ocr(
                "pdftoppm not found (install poppler-utils)".to_string(),
            )),
            Err(e) => Err(RedactError::Io {
                path: pdf_path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Grayscale + contrast boost before recognition; scanned documents
    /// with faint print recognize noticeably better after this step.
    fn enhance(&self, raster: &Path, dir: &Path) -> RedactResult<PathBuf> {
        let img = image::open(raster)
            .map_err(|e| RedactError::Ocr(format!("cannot read raster image: {}", e)))?;
        let enhanced = img.grayscale().adjust_contrast(self.contrast);
        let out = dir.join("enhanced.png");
        enhanced
            .save(&out)
            .map_err(|e| RedactError::Ocr(format!("cannot write enhanced image: {}", e)))?;
        Ok(out)
    }

    fn run_tesseract(&self, image_path: &Path) -> RedactResult<String> {
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output();

        match output {
            Ok(out) if out.status.success() => {
                Ok(String::from_utf8_lossy(&out.stdout).to_string())
            }
            Ok(out) => {
                let stderr = String::from_utf8_lossy(&out.stderr);
                Err(RedactError::Ocr(format!("tesseract failed: {}", stderr)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(RedactError::Ocr(
                "tesseract not found (install tesseract-ocr)".to_string(),
            )),
            Err(e) => Err(RedactError::Io {
                path: image_path.to_path_buf(),
                source: e,
            }),
        }
    }
}

// pdftoppm pads the page number to the digit count of the document's
// last page, so probe the plausible widths.
fn find_page_image(dir: &Path, page_number: usize) -> Option<PathBuf> {
    for digits in [1, 2, 3, 4] {
        let candidate = dir.join(format!("page-{:0width$}.png", page_number, width = digits));
        if candidate.exists() {
            return Some(candidate);
        }
    }
    None
}
