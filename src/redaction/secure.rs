//! Secure redaction strategy using MuPDF.
//!
//! Physically removes content through MuPDF's redaction API: a redaction
//! annotation is placed over each located region and `redact()` deletes
//! the underlying text and vector content from the page's content
//! stream. The removed text is not extractable from the output.

use mupdf::pdf::{PdfAnnotationType, PdfDocument, PdfPage};
use mupdf::{Page, Rect as MuRect};
use tracing::debug;

use crate::config::FillColor;
use crate::error::{RedactError, RedactResult};

use super::strategy::{PagePlan, Rect, RedactionOutcome, RedactionRegion, RedactionStrategy};

/// Secure redaction strategy.
///
/// Per page, work happens in two phases:
/// 1. locate: every literal is searched and every hit recorded as a
///    [`RedactionRegion`];
/// 2. apply: annotations are created for all recorded regions, then the
///    page commits them in one `redact()` call.
///
/// Searching never resumes on a page once removal has started there, so
/// search results cannot be invalidated by content shifting.
#[derive(Debug, Clone)]
pub struct SecureRedactionStrategy {
    /// Maximum search hits per literal per page.
    max_hits: u32,
}

impl Default for SecureRedactionStrategy {
    fn default() -> Self {
        Self { max_hits: 256 }
    }
}

impl SecureRedactionStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_hits(mut self, max_hits: u32) -> Self {
        self.max_hits = max_hits;
        self
    }

    /// Locates every visual occurrence of every literal on a page.
    ///
    /// A literal appearing N times yields N regions; zero hits for a
    /// literal is not an error.
    fn locate_regions(
        &self,
        page: &Page,
        page_index: usize,
        literals: &[String],
        fill: FillColor,
    ) -> RedactResult<Vec<RedactionRegion>> {
        let mut regions = Vec::new();
        for literal in literals {
            let hits =
                page.search(literal, self.max_hits)
                    .map_err(|e| RedactError::RedactionApply {
                        message: format!("search failed for literal '{}'", literal),
                        page: Some(page_index + 1),
                        source: Some(Box::new(e)),
                    })?;
            for quad in hits {
                regions.push(RedactionRegion {
                    page_index,
                    rect: Rect {
                        x0: quad.ul.x.min(quad.ll.x).min(quad.ur.x).min(quad.lr.x),
                        y0: quad.ul.y.min(quad.ll.y).min(quad.ur.y).min(quad.lr.y),
                        x1: quad.ul.x.max(quad.ll.x).max(quad.ur.x).max(quad.lr.x),
                        y1: quad.ul.y.max(quad.ll.y).max(quad.ur.y).max(quad.lr.y),
                    },
                    fill,
                });
            }
        }
        Ok(regions)
    }

    /// Creates annotations for all regions on a page and commits them.
    fn apply_regions(
        &self,
        pdf_page: &mut PdfPage,
        page_index: usize,
        regions: &[RedactionRegion],
    ) -> RedactResult<()> {
        for region in regions {
            let annot = pdf_page
                .create_annotation(PdfAnnotationType::Redact)
                .map_err(|e| RedactError::RedactionApply {
                    message: "failed to create redaction annotation".to_string(),
                    page: Some(page_index + 1),
                    source: Some(Box::new(e)),
                })?;

            let rect = MuRect {
                x0: region.rect.x0,
                y0: region.rect.y0,
                x1: region.rect.x1,
                y1: region.rect.y1,
            };
            unsafe {
                ffi::set_annotation_rect(&annot, rect);
                ffi::set_annotation_fill(&annot, region.fill);
            }
        }

        pdf_page
            .redact()
            .map(|_| ())
            .map_err(|e| RedactError::RedactionApply {
                message: "failed to commit removals".to_string(),
                page: Some(page_index + 1),
                source: Some(Box::new(e)),
            })
    }
}

impl RedactionStrategy for SecureRedactionStrategy {
    fn apply(
        &self,
        doc: &PdfDocument,
        plan: &[PagePlan],
        fill: FillColor,
    ) -> RedactResult<RedactionOutcome> {
        let page_count = doc.page_count().map_err(|e| RedactError::RedactionApply {
            message: "failed to get page count".to_string(),
            page: None,
            source: Some(Box::new(e)),
        })? as usize;

        let mut outcome = RedactionOutcome {
            pages_processed: page_count,
            secure: true,
            ..Default::default()
        };

        for page_plan in plan {
            if page_plan.literals.is_empty() {
                continue;
            }
            let page_index = page_plan.page_index;
            let page =
                doc.load_page(page_index as i32)
                    .map_err(|e| RedactError::RedactionApply {
                        message: "failed to load page".to_string(),
                        page: Some(page_index + 1),
                        source: Some(Box::new(e)),
                    })?;

            let regions = self.locate_regions(&page, page_index, &page_plan.literals, fill)?;
            debug!(
                page = page_index + 1,
                literals = page_plan.literals.len(),
                regions = regions.len(),
                "located redaction regions"
            );
            if regions.is_empty() {
                continue;
            }

            let mut pdf_page = match PdfPage::try_from(page) {
                Ok(p) => p,
                Err(_) => continue, // non-PDF page, nothing to redact
            };
            self.apply_regions(&mut pdf_page, page_index, &regions)?;

            outcome.instances_redacted += regions.len();
            outcome.pages_modified += 1;
        }

        Ok(outcome)
    }

    fn name(&self) -> &str {
        "SecureRedaction"
    }

    fn is_secure(&self) -> bool {
        true
    }
}

/// FFI helpers for MuPDF annotation operations.
mod ffi {
    use mupdf::pdf::PdfAnnotation;
    use mupdf::Rect;

    use crate::config::FillColor;

    #[repr(C)]
    struct PdfAnnotRaw {
        inner: *mut mupdf_sys::pdf_annot,
    }

    /// Sets the rectangle for a PDF annotation via FFI.
    ///
    /// # Safety
    /// The annotation must be valid and the context properly initialized.
    pub unsafe fn set_annotation_rect(annot: &PdfAnnotation, rect: Rect) {
        let annot_raw = std::mem::transmute::<&PdfAnnotation, &PdfAnnotRaw>(annot);
        let ctx = mupdf_sys::mupdf_new_base_context();

        if !ctx.is_null() {
            let fz_rect = mupdf_sys::fz_rect {
                x0: rect.x0,
                y0: rect.y0,
                x1: rect.x1,
                y1: rect.y1,
            };

            mupdf_sys::pdf_set_annot_rect(ctx, annot_raw.inner, fz_rect);
            mupdf_sys::mupdf_drop_base_context(ctx);
        }
    }

    /// Sets the solid fill painted where content was removed.
    ///
    /// # Safety
    /// Same requirements as [`set_annotation_rect`].
    pub unsafe fn set_annotation_fill(annot: &PdfAnnotation, fill: FillColor) {
        let annot_raw = std::mem::transmute::<&PdfAnnotation, &PdfAnnotRaw>(annot);
        let ctx = mupdf_sys::mupdf_new_base_context();

        if !ctx.is_null() {
            let color = [fill.r, fill.g, fill.b];
            mupdf_sys::pdf_set_annot_interior_color(ctx, annot_raw.inner, 3, color.as_ptr());
            mupdf_sys::mupdf_drop_base_context(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_metadata() {
        let strategy = SecureRedactionStrategy::new();
        assert_eq!(strategy.name(), "SecureRedaction");
        assert!(strategy.is_secure());
    }

    #[test]
    fn test_max_hits_configuration() {
        let strategy = SecureRedactionStrategy::new().with_max_hits(50);
        assert_eq!(strategy.max_hits, 50);
    }
}
