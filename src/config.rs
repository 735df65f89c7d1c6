//! Static pipeline configuration.
//!
//! The entity-label allow-list and the ordered rule set are loaded once
//! at process start, either from a TOML file or from built-in defaults.
//! Configuration is never request-scoped.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::detect::{default_rule_configs, RedactionRule};
use crate::error::{RedactError, RedactResult};

/// Default NER labels redacted when no configuration file is given.
pub const DEFAULT_LABELS: &[&str] = &[
    "PERSON", "ORG", "GPE", "LOC", "NORP", "FAC", "DATE", "CARDINAL",
];

/// Parsed redaction configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RedactionConfig {
    /// NER entity labels to redact.
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,
    /// Ordered regex rules; order is significant for tie resolution.
    #[serde(default = "default_rule_configs")]
    pub rules: Vec<RedactionRule>,
    /// Fill color for redaction boxes, RGB in 0..=1. Defaults to black.
    #[serde(default)]
    pub fill_color: FillColor,
}

/// Solid fill applied to every redaction region.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FillColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for FillColor {
    fn default() -> Self {
        Self {
            r: 0.0,
            g: 0.0,
            b: 0.0,
        }
    }
}

fn default_labels() -> Vec<String> {
    DEFAULT_LABELS.iter().map(|s| s.to_string()).collect()
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            labels: default_labels(),
            rules: default_rule_configs(),
            fill_color: FillColor::default(),
        }
    }
}

impl RedactionConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> RedactResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| RedactError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&raw).map_err(|e| RedactError::InvalidInput {
            parameter: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Label allow-list as a lookup set.
    pub fn label_set(&self) -> HashSet<String> {
        self.labels.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RedactionConfig::default();
        assert!(config.labels.contains(&"PERSON".to_string()));
        assert_eq!(config.rules.len(), 9);
        assert_eq!(config.fill_color.r, 0.0);
    }

    #[test]
    fn test_parse_toml() {
        let raw = r#"
            labels = ["PERSON", "ORG"]

            [[rules]]
            id = "badge"
            pattern = '\bEMP-\d{6}\b'
            replacement = "[BADGE]"

            [fill_color]
            r = 1.0
            g = 0.0
            b = 0.0
        "#;
        let config: RedactionConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.labels, vec!["PERSON", "ORG"]);
        assert_eq!(config.rules.len(), 1);
        assert_eq!(config.rules[0].id, "badge");
        assert_eq!(config.fill_color.r, 1.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RedactionConfig = toml::from_str(r#"labels = ["PERSON"]"#).unwrap();
        assert_eq!(config.labels, vec!["PERSON"]);
        assert_eq!(config.rules.len(), 9);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RedactionConfig::from_file(Path::new("/nonexistent/rules.toml")).unwrap_err();
        assert!(matches!(err, RedactError::Io { .. }));
    }
}
