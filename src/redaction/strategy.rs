//! Redaction strategy trait and supporting types.

use mupdf::pdf::PdfDocument;

use crate::config::FillColor;
use crate::error::RedactResult;

/// Rectangular page area, PDF coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// One area scheduled for irreversible removal.
///
/// A single detected literal yields one region per visual occurrence on
/// the page; zero regions (literal no longer present verbatim, e.g. OCR
/// noise) is valid and silently skipped.
#[derive(Debug, Clone)]
pub struct RedactionRegion {
    pub page_index: usize,
    pub rect: Rect,
    pub fill: FillColor,
}

/// Literal strings to remove from one page, produced by reconciliation.
#[derive(Debug, Clone)]
pub struct PagePlan {
    pub page_index: usize,
    pub literals: Vec<String>,
}

/// Statistics for a completed redaction pass.
#[derive(Debug, Clone, Default)]
pub struct RedactionOutcome {
    /// Regions removed across the document.
    pub instances_redacted: usize,
    /// Pages examined.
    pub pages_processed: usize,
    /// Pages whose content changed.
    pub pages_modified: usize,
    /// Whether content was physically removed (vs visually obscured).
    pub secure: bool,
}

impl RedactionOutcome {
    pub fn has_redactions(&self) -> bool {
        self.instances_redacted > 0
    }
}

/// Strategy for applying redaction regions to an open document.
///
/// The orchestrator owns opening and saving; a strategy only locates
/// regions and commits removals page by page. Implementations must
/// locate every region on a page before applying any removal on that
/// page: removal can shift positions reported by subsequent searches.
pub trait RedactionStrategy: Send + Sync {
    /// Applies all planned removals to `doc`, page by page.
    fn apply(
        &self,
        doc: &PdfDocument,
        plan: &[PagePlan],
        fill: FillColor,
    ) -> RedactResult<RedactionOutcome>;

    /// Human-readable strategy name.
    fn name(&self) -> &str;

    /// Whether this strategy physically deletes content.
    fn is_secure(&self) -> bool;
}
