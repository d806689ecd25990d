//! User settings and session state for htmlsmith
//!
//! `Settings` holds the user-configurable options; `Session` holds the last
//! converted input so it can be converted again later. Both are persisted as
//! JSON with serde.

use serde::{Deserialize, Serialize};

use crate::format::FormatOptions;
use crate::markdown::MarkdownOptions;
use crate::structure::Mode;

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Persistent user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Interpret input as Markdown (last mode used)
    pub parse_markup: bool,

    /// Markdown extensions and rendering switches
    pub markdown: MarkdownOptions,

    /// HTML layout options
    pub format: FormatOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            parse_markup: false,
            markdown: MarkdownOptions::default(),
            format: FormatOptions::default(),
        }
    }
}

impl Settings {
    /// The conversion mode these settings select.
    pub fn mode(&self) -> Mode {
        Mode::from(self.parse_markup)
    }

    /// Remember `mode` as the last one used.
    pub fn set_mode(&mut self, mode: Mode) {
        self.parse_markup = mode.parses_markup();
    }

    /// Clamp values into their valid ranges.
    pub fn sanitize(&mut self) {
        self.format.sanitize();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

/// The last input converted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub input: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.parse_markup);
        assert_eq!(settings.mode(), Mode::Plain);
        assert_eq!(settings.format, FormatOptions::default());
    }

    #[test]
    fn test_set_mode() {
        let mut settings = Settings::default();
        settings.set_mode(Mode::Rich);
        assert!(settings.parse_markup);
        assert_eq!(settings.mode(), Mode::Rich);
    }

    #[test]
    fn test_settings_roundtrip() {
        let mut settings = Settings::default();
        settings.parse_markup = true;
        settings.format.indent_size = 2;
        settings.markdown.footnotes = true;

        let json = serde_json::to_string_pretty(&settings).unwrap();
        let loaded: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"parse_markup": true}"#).unwrap();
        assert!(settings.parse_markup);
        assert_eq!(settings.markdown, MarkdownOptions::default());
    }

    #[test]
    fn test_sanitize_clamps_format() {
        let mut settings = Settings::default();
        settings.format.indent_size = 99;
        settings.format.max_preserve_newlines = 99;
        settings.sanitize();
        assert_eq!(settings.format.indent_size, crate::format::options::MAX_INDENT_SIZE);
        assert_eq!(
            settings.format.max_preserve_newlines,
            crate::format::options::MAX_PRESERVED_NEWLINES
        );
    }

    #[test]
    fn test_wrong_types_rejected() {
        let result: Result<Settings, _> = serde_json::from_str(r#"{"parse_markup": "yes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_session_default_is_empty() {
        assert!(Session::default().input.is_empty());
    }
}
