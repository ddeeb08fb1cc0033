//! Plain-data settings for the autocomplete widget.
//!
//! Everything that is not a closure can be described by [`Settings`], which
//! deserializes with a default for every missing field. Closures (label,
//! filter, render and notification functions) are attached with the `with_*`
//! builders on the widget itself.
//!
//! ```rust
//! use bubbletea_autocomplete::config::Settings;
//!
//! let settings = Settings::from_json(r#"{ "multiple": true, "debounce_ms": 150 }"#).unwrap();
//! assert!(settings.multiple);
//! assert_eq!(settings.debounce_ms, 150);
//! assert_eq!(settings.placeholder, "Search...");
//! ```

use crate::selection::SelectionMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings document is not valid JSON or has wrongly typed fields.
    #[error("invalid autocomplete settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// `max_visible` must allow at least one row.
    #[error("max_visible must be at least 1")]
    NoVisibleRows,
}

/// Caller-facing configuration with documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Debounce delay in milliseconds. Default 300.
    pub debounce_ms: u64,
    /// Multiple selection. Default false.
    pub multiple: bool,
    /// Ignore all interaction. Default false.
    pub disabled: bool,
    /// Show the loading indicator. Purely advisory. Default false.
    pub loading: bool,
    /// Text shown in the empty input. Default `"Search..."`.
    pub placeholder: String,
    /// Optional label rendered above the input.
    pub label: Option<String>,
    /// Optional help text rendered below the widget.
    pub description: Option<String>,
    /// Text shown when the filtered list is empty. Default `"No options found"`.
    pub empty_text: String,
    /// Rows visible in the dropdown before it scrolls. Default 6.
    pub max_visible: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            multiple: false,
            disabled: false,
            loading: false,
            placeholder: "Search...".to_string(),
            label: None,
            description: None,
            empty_text: "No options found".to_string(),
            max_visible: 6,
        }
    }
}

impl Settings {
    /// Parses and validates settings from a JSON document.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks invariants that the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_visible == 0 {
            return Err(ConfigError::NoVisibleRows);
        }
        Ok(())
    }

    /// The debounce delay as a duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// The selection mode implied by `multiple`.
    pub fn mode(&self) -> SelectionMode {
        if self.multiple {
            SelectionMode::Multiple
        } else {
            SelectionMode::Single
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.debounce(), Duration::from_millis(300));
        assert_eq!(s.mode(), SelectionMode::Single);
        assert!(!s.disabled);
        assert!(!s.loading);
        assert_eq!(s.empty_text, "No options found");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let s = Settings::from_json("{}").unwrap();
        assert_eq!(s, Settings::default());

        let s = Settings::from_json(r#"{ "label": "Fruit", "loading": true }"#).unwrap();
        assert_eq!(s.label.as_deref(), Some("Fruit"));
        assert!(s.loading);
        assert_eq!(s.max_visible, 6);
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(Settings::from_json("not json"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            Settings::from_json(r#"{ "debounce_ms": "fast" }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "max_visible": 0 }"#),
            Err(ConfigError::NoVisibleRows)
        ));
    }
}
