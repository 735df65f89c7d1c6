//! Common test utilities and helpers.
//!
//! Shared across the integration test crates:
//! - custom assertions
//! - test PDF builders
//! - PDF inspection helpers

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod pdf_helpers;

pub use assertions::*;
pub use fixtures::*;
pub use pdf_helpers::*;
