//! Redaction strategies.
//!
//! A strategy turns per-page literal lists into permanently removed
//! regions on an open document. The default (and only shipped) strategy
//! is [`SecureRedactionStrategy`], which deletes content rather than
//! covering it.

pub mod secure;
pub mod strategy;

pub use secure::SecureRedactionStrategy;
pub use strategy::{PagePlan, Rect, RedactionOutcome, RedactionRegion, RedactionStrategy};
