//! Rule-based PII detection.
//!
//! A [`RuleSet`] is an ordered, immutable collection of regex rules
//! compiled once per process. Rules run in declaration order and each
//! rule emits one span per non-overlapping match, labeled with the rule
//! identifier. Patterns are word-boundary anchored so that structured
//! identifiers do not swallow neighboring tokens (a bank-account rule
//! must not eat part of a credit-card number).

use regex::Regex;
use serde::Deserialize;

use crate::error::{RedactError, RedactResult};

use super::span::{DetectedSpan, SpanSource};

/// A single redaction rule as it appears in configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RedactionRule {
    /// Stable identifier, also used as the span label.
    pub id: String,
    /// Regex pattern in `regex` crate syntax.
    pub pattern: String,
    /// Placeholder recorded in audit output (e.g. `[EMAIL]`).
    pub replacement: String,
}

impl RedactionRule {
    pub fn new(id: &str, pattern: &str, replacement: &str) -> Self {
        Self {
            id: id.to_string(),
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

struct CompiledRule {
    id: String,
    regex: Regex,
    #[allow(dead_code)]
    replacement: String,
}

/// Ordered set of compiled redaction rules.
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compiles the given rules, preserving declaration order.
    pub fn compile(rules: &[RedactionRule]) -> RedactResult<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let regex = Regex::new(&rule.pattern).map_err(|e| RedactError::Pattern {
                pattern: rule.pattern.clone(),
                reason: e.to_string(),
            })?;
            compiled.push(CompiledRule {
                id: rule.id.clone(),
                regex,
                replacement: rule.replacement.clone(),
            });
        }
        Ok(Self { rules: compiled })
    }

    /// Compiles the built-in default rules.
    pub fn default_rules() -> RedactResult<Self> {
        Self::compile(&default_rule_configs())
    }

    /// Finds all rule matches in `text`, in rule declaration order.
    ///
    /// Matches of a single rule never overlap each other; matches of
    /// different rules may. Overlap resolution happens during
    /// reconciliation, not here.
    pub fn find_spans(&self, text: &str) -> Vec<DetectedSpan> {
        let mut spans = Vec::new();
        for rule in &self.rules {
            for m in rule.regex.find_iter(text) {
                if let Some(span) =
                    DetectedSpan::new(text, m.start(), m.end(), rule.id.clone(), SpanSource::Rule)
                {
                    spans.push(span);
                }
            }
        }
        spans
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Built-in rule set.
///
/// Consolidates the structured-identifier patterns the tool ships with.
/// Order matters for reconciliation tie-breaks: more specific formats
/// are declared before broader numeric ones.
pub fn default_rule_configs() -> Vec<RedactionRule> {
    vec![
        RedactionRule::new(
            "email",
            r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,20}\b",
            "[EMAIL]",
        ),
        RedactionRule::new("ssn", r"\b\d{3}-\d{2}-\d{4}\b", "[SSN]"),
        RedactionRule::new("pan", r"\b[A-Z]{5}[0-9]{4}[A-Z]\b", "[PAN]"),
        RedactionRule::new("aadhaar", r"\b\d{4}[\s-]\d{4}[\s-]\d{4}\b", "[AADHAAR]"),
        RedactionRule::new(
            "credit_card",
            r"\b(?:\d{4}[-\s]){3}\d{4}\b",
            "[CREDIT_CARD]",
        ),
        RedactionRule::new(
            "ip_address",
            r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b",
            "[IP_ADDRESS]",
        ),
        RedactionRule::new(
            "phone",
            r"(?:\+\d{1,3}[-.\s]?)?\b\(?\d{2,4}\)?[-.\s]?\d{3,4}[-.\s]?\d{4}\b",
            "[PHONE]",
        ),
        RedactionRule::new("bank_account", r"\b\d{9,18}\b", "[BANK_ACC]"),
        RedactionRule::new(
            "date",
            r"\b(?:\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4}[/-]\d{1,2}[/-]\d{1,2})\b",
            "[DATE]",
        ),
    ]
}
