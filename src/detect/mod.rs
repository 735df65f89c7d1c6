//! Multi-source PII detection.
//!
//! Two sub-detectors feed the pipeline: statistical NER models (see
//! [`ner`]) and the configured regex [`rules`]. Their raw output is a
//! plain union; [`reconcile`] turns it into the stable, offset-ordered
//! list of literals that redaction will search for.

pub mod ner;
pub mod rules;
pub mod span;

pub use ner::{ModelRegistry, NerModel};
pub use rules::{default_rule_configs, RedactionRule, RuleSet};
pub use span::{DetectedSpan, SpanSource};

use std::collections::HashSet;

/// Runs NER models and rule matching over a text string.
///
/// NER output is filtered through the configured label allow-list; rule
/// output always passes (rules are explicit operator configuration).
pub struct EntityDetector<'a> {
    models: &'a ModelRegistry,
    rules: &'a RuleSet,
    allowed_labels: &'a HashSet<String>,
}

impl<'a> EntityDetector<'a> {
    pub fn new(
        models: &'a ModelRegistry,
        rules: &'a RuleSet,
        allowed_labels: &'a HashSet<String>,
    ) -> Self {
        Self {
            models,
            rules,
            allowed_labels,
        }
    }

    /// Detects PII spans in `text`.
    ///
    /// Deterministic for a fixed text and configuration. Overlaps and
    /// duplicates across sources are preserved here; call [`reconcile`]
    /// on the result before redacting.
    pub fn detect(&self, text: &str) -> Vec<DetectedSpan> {
        let mut spans: Vec<DetectedSpan> = self
            .models
            .entities(text)
            .into_iter()
            .filter(|s| self.allowed_labels.contains(&s.label))
            .collect();
        spans.extend(self.rules.find_spans(text));
        spans
    }
}

/// Curates raw detection output into the list of strings to redact.
///
/// Spans are sorted by start offset; ties are broken by source (rule
/// matches outrank statistical ones) and then by length, longer first.
/// Exact duplicates (same text, same label) collapse to one. Overlapping
/// spans from different sources are both kept: each carries its own
/// triggering label for audit, and redaction removes every visual
/// occurrence of each literal anyway, so keeping both never changes the
/// final page.
pub fn reconcile(mut spans: Vec<DetectedSpan>) -> Vec<DetectedSpan> {
    spans.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| a.source.rank().cmp(&b.source.rank()))
            .then_with(|| b.len().cmp(&a.len()))
    });
    let mut seen: HashSet<(String, String)> = HashSet::new();
    spans.retain(|s| seen.insert((s.text.clone(), s.label.clone())));
    spans
}
