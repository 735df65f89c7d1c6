//! Detected span type shared by all detector sources.

use std::fmt;

/// Which sub-detector produced a span.
///
/// Kept as a closed two-variant enum because reconciliation tie-breaks
/// depend on knowing the source: rule matches are structured and
/// high-precision, so they outrank statistical matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanSource {
    /// Statistical named-entity model.
    Ner,
    /// Regex rule from the configured rule set.
    Rule,
}

impl SpanSource {
    /// Ordering rank used when two spans start at the same offset.
    /// Lower sorts first.
    pub(crate) fn rank(self) -> u8 {
        match self {
            SpanSource::Rule => 0,
            SpanSource::Ner => 1,
        }
    }
}

impl fmt::Display for SpanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanSource::Ner => write!(f, "ner"),
            SpanSource::Rule => write!(f, "rule"),
        }
    }
}

/// A contiguous substring of page text flagged for redaction.
///
/// Invariant: `start < end` and both offsets are byte offsets into the
/// text the span was detected in, with `text == &page_text[start..end]`.
/// Spans are derived data; they are discarded once the page they came
/// from has been redacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedSpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub source: SpanSource,
}

impl DetectedSpan {
    /// Builds a span from a regex match or model hit, checking the
    /// offset invariant against the source text.
    pub fn new(
        source_text: &str,
        start: usize,
        end: usize,
        label: impl Into<String>,
        source: SpanSource,
    ) -> Option<Self> {
        if start >= end || end > source_text.len() {
            return None;
        }
        let text = source_text.get(start..end)?.to_string();
        Some(Self {
            text,
            start,
            end,
            label: label.into(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
