//! Statistical named-entity recognition.
//!
//! Provides a [`NerModel`] trait for pluggable per-language models and
//! two built-in implementations: an English model (person names with
//! optional titles, organization suffixes, a place gazetteer, spelled-out
//! dates) and a language-agnostic fallback that detects capitalized name
//! runs in any Latin-derived script. Model outputs are unioned by the
//! caller; duplicate collapse happens at reconciliation.
//!
//! Models are process-wide, read-only shared state: [`init`] loads them
//! exactly once and fails with `ModelUnavailable` if any pattern refuses
//! to compile. Concurrent readers are fine; there is no reload path.

use std::collections::HashSet;

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::error::{RedactError, RedactResult};

use super::span::{DetectedSpan, SpanSource};

/// A statistical entity model for one language (or language family).
pub trait NerModel: Send + Sync {
    /// Model identifier, e.g. `"en_core"` or `"multilingual"`.
    fn name(&self) -> &str;

    /// Extracts labeled entity spans from text. Labels are not filtered
    /// here; the allow-list is applied by the detector.
    fn entities(&self, text: &str) -> Vec<DetectedSpan>;
}

/// Process-wide registry of loaded NER models.
pub struct ModelRegistry {
    models: Vec<Box<dyn NerModel>>,
}

static REGISTRY: OnceCell<ModelRegistry> = OnceCell::new();

/// Loads all models, or returns the already-loaded registry.
///
/// Call once at process start; a `ModelUnavailable` error here means the
/// process must not accept requests.
pub fn init() -> RedactResult<&'static ModelRegistry> {
    REGISTRY.get_or_try_init(ModelRegistry::load)
}

impl ModelRegistry {
    fn load() -> RedactResult<Self> {
        Ok(Self {
            models: vec![
                Box::new(EnglishNerModel::load()?),
                Box::new(MultilingualNerModel::load()?),
            ],
        })
    }

    /// Runs every model over the text and unions the results.
    pub fn entities(&self, text: &str) -> Vec<DetectedSpan> {
        let mut spans = Vec::new();
        for model in &self.models {
            spans.extend(model.entities(text));
        }
        spans
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name()).collect()
    }
}

fn compile(name: &str, pattern: &str) -> RedactResult<Regex> {
    Regex::new(pattern).map_err(|e| RedactError::ModelUnavailable {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

// Words that start capitalized runs without being part of a name.
// Trimmed from the ends of candidate runs before a PERSON is emitted.
const NAME_TRIM_WORDS: &[&str] = &[
    "The", "This", "That", "These", "Those", "Contact", "Dear", "From", "To", "Call", "Email",
    "Phone", "Fax", "Please", "Regards", "Sincerely", "Thank", "Thanks", "Page", "Date", "Name",
    "Address", "Account", "Invoice", "Subject", "Attention", "Attn", "Our", "Your", "His", "Her",
    "Bill", "Statement", "Total", "Amount", "Due", "Summary", "Report", "Meeting", "Monday",
    "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

// Capitalized pairs that look like names but never are.
const NAME_STOPLIST: &[&str] = &[
    "United States",
    "New York",
    "New Delhi",
    "Los Angeles",
    "San Francisco",
    "Hong Kong",
    "South Africa",
    "North America",
    "South America",
    "Middle East",
    "European Union",
    "Privacy Policy",
    "Terms Conditions",
];

/// Trims non-name tokens from both ends of a capitalized run.
///
/// Returns the byte range of the surviving tokens within `run`, or None
/// when fewer than two tokens survive.
fn trim_name_run(run: &str, trim_words: &HashSet<&str>) -> Option<(usize, usize)> {
    let mut tokens: Vec<(usize, &str)> = Vec::new();
    let mut offset = 0;
    for part in run.split_whitespace() {
        // split_whitespace drops offsets; recover them by scanning.
        let found = run[offset..].find(part).map(|i| offset + i)?;
        tokens.push((found, part));
        offset = found + part.len();
    }

    let mut lo = 0;
    let mut hi = tokens.len();
    while lo < hi && trim_words.contains(tokens[lo].1) {
        lo += 1;
    }
    while hi > lo && trim_words.contains(tokens[hi - 1].1) {
        hi -= 1;
    }
    if hi - lo < 2 {
        return None;
    }
    let start = tokens[lo].0;
    let end = tokens[hi - 1].0 + tokens[hi - 1].1.len();
    Some((start, end))
}

// ============================================================================
// English model
// ============================================================================

/// English NER model: PERSON, ORG, GPE, DATE.
pub struct EnglishNerModel {
    titled_name: Regex,
    name_run: Regex,
    org_suffix: Regex,
    month_date: Regex,
    gpe: Vec<Regex>,
    trim_words: HashSet<&'static str>,
    stoplist: HashSet<&'static str>,
}

// Compact place gazetteer. High precision is preferred over coverage;
// broader geography comes from configuration rules when needed.
const GPE_GAZETTEER: &[&str] = &[
    "United States",
    "India",
    "Canada",
    "Germany",
    "France",
    "Japan",
    "China",
    "Brazil",
    "Australia",
    "United Kingdom",
    "New York",
    "London",
    "Paris",
    "Berlin",
    "Tokyo",
    "Mumbai",
    "Delhi",
    "New Delhi",
    "Chicago",
    "Boston",
    "Seattle",
    "Toronto",
    "Sydney",
    "Singapore",
    "Dubai",
    "Washington",
    "California",
    "Texas",
    "Florida",
    "Bangalore",
    "Hyderabad",
    "Chennai",
    "Kolkata",
    "Pune",
    "San Francisco",
    "Los Angeles",
];

impl EnglishNerModel {
    pub fn load() -> RedactResult<Self> {
        let name = "en_core";
        let mut gpe = Vec::with_capacity(GPE_GAZETTEER.len());
        for place in GPE_GAZETTEER {
            gpe.push(compile(name, &format!(r"\b{}\b", regex::escape(place)))?);
        }
        Ok(Self {
            titled_name: compile(
                name,
                r"(?:Mr\.|Mrs\.|Ms\.|Dr\.|Prof\.)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})",
            )?,
            name_run: compile(
                name,
                r"\b[A-Z][a-z]+(?:\s+(?:[A-Z]\.\s+)?[A-Z][a-z]+)+\b",
            )?,
            org_suffix: compile(
                name,
                r"\b[A-Z][A-Za-z&.]*(?:\s+[A-Z][A-Za-z&.]*)*\s+(?:Inc\.?|LLC|Ltd\.?|Corp\.?|Corporation|Company|GmbH|PLC)\b",
            )?,
            month_date: compile(
                name,
                r"\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},?\s+\d{4}\b",
            )?,
            gpe,
            trim_words: NAME_TRIM_WORDS.iter().copied().collect(),
            stoplist: NAME_STOPLIST.iter().copied().collect(),
        })
    }

    fn persons(&self, text: &str, spans: &mut Vec<DetectedSpan>) {
        for caps in self.titled_name.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                if let Some(span) =
                    DetectedSpan::new(text, m.start(), m.end(), "PERSON", SpanSource::Ner)
                {
                    spans.push(span);
                }
            }
        }
        for m in self.name_run.find_iter(text) {
            let Some((lo, hi)) = trim_name_run(m.as_str(), &self.trim_words) else {
                continue;
            };
            let start = m.start() + lo;
            let end = m.start() + hi;
            if self.stoplist.contains(&text[start..end]) {
                continue;
            }
            if let Some(span) = DetectedSpan::new(text, start, end, "PERSON", SpanSource::Ner) {
                spans.push(span);
            }
        }
    }
}

impl NerModel for EnglishNerModel {
    fn name(&self) -> &str {
        "en_core"
    }

    fn entities(&self, text: &str) -> Vec<DetectedSpan> {
        let mut spans = Vec::new();
        self.persons(text, &mut spans);
        for m in self.org_suffix.find_iter(text) {
            if let Some(span) = DetectedSpan::new(text, m.start(), m.end(), "ORG", SpanSource::Ner)
            {
                spans.push(span);
            }
        }
        for regex in &self.gpe {
            for m in regex.find_iter(text) {
                if let Some(span) =
                    DetectedSpan::new(text, m.start(), m.end(), "GPE", SpanSource::Ner)
                {
                    spans.push(span);
                }
            }
        }
        for m in self.month_date.find_iter(text) {
            if let Some(span) = DetectedSpan::new(text, m.start(), m.end(), "DATE", SpanSource::Ner)
            {
                spans.push(span);
            }
        }
        spans
    }
}

// ============================================================================
// Multilingual fallback model
// ============================================================================

/// Language-agnostic model: capitalized name runs across Latin-derived
/// scripts, emitted as PERSON. Deliberately conservative; its output is
/// unioned with the English model and exact duplicates collapse later.
pub struct MultilingualNerModel {
    name_run: Regex,
    trim_words: HashSet<&'static str>,
    stoplist: HashSet<&'static str>,
}

impl MultilingualNerModel {
    pub fn load() -> RedactResult<Self> {
        Ok(Self {
            name_run: compile(
                "multilingual",
                r"\p{Lu}[\p{Ll}\p{M}'-]+(?:\s+\p{Lu}[\p{Ll}\p{M}'-]+)+",
            )?,
            trim_words: NAME_TRIM_WORDS.iter().copied().collect(),
            stoplist: NAME_STOPLIST.iter().copied().collect(),
        })
    }
}

impl NerModel for MultilingualNerModel {
    fn name(&self) -> &str {
        "multilingual"
    }

    fn entities(&self, text: &str) -> Vec<DetectedSpan> {
        let mut spans = Vec::new();
        for m in self.name_run.find_iter(text) {
            let Some((lo, hi)) = trim_name_run(m.as_str(), &self.trim_words) else {
                continue;
            };
            let start = m.start() + lo;
            let end = m.start() + hi;
            if self.stoplist.contains(&text[start..end]) {
                continue;
            }
            if let Some(span) = DetectedSpan::new(text, start, end, "PERSON", SpanSource::Ner) {
                spans.push(span);
            }
        }
        spans
    }
}
