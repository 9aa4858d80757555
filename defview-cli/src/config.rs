//! DefView configuration loading from `.defviewrc.toml`.
//!
//! Configuration is optional - DefView uses sensible defaults if no config
//! file exists. Command-line flags always win over the file.
//!
//! # Example Configuration
//!
//! ```toml
//! [extractor]
//! prefix_markers = ["@", "/", "#", "[", ";", "-", "*"]
//! closing_chars = ["}", "]"]
//!
//! [output]
//! format = "table"
//! color = true
//! markup = "ansi"
//!
//! [highlight]
//! theme = "base16-ocean.dark"
//! ```

use defview_core::ExtractorConfig;
use serde::Deserialize;
use std::path::Path;

use crate::highlight::{Markup, DEFAULT_THEME};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = ".defviewrc.toml";

/// Root configuration structure loaded from `.defviewrc.toml`.
///
/// All sections are optional and will use defaults if not specified.
#[derive(Debug, Deserialize, Default)]
pub struct DefViewConfig {
    /// Marker characters for block extraction.
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,

    /// Highlighting preferences.
    #[serde(default)]
    pub highlight: HighlightSettings,
}

/// Output formatting preferences.
///
/// Command-line flags (e.g., `--format json`) override these settings.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: `table` or `json`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output.
    ///
    /// Defaults to `true` when stdout is a TTY.
    #[serde(default)]
    pub color: Option<bool>,

    /// Default markup for `show`: `ansi`, `html` or `plain`.
    #[serde(default)]
    pub markup: Option<Markup>,
}

/// Highlighting preferences.
#[derive(Debug, Deserialize, Default)]
pub struct HighlightSettings {
    /// syntect theme name, e.g. `base16-ocean.dark` or `InspiredGitHub`.
    #[serde(default)]
    pub theme: Option<String>,
}

impl DefViewConfig {
    /// Load configuration from `.defviewrc.toml` in the given directory.
    ///
    /// If the config file doesn't exist or can't be parsed, returns defaults.
    /// Parse errors are logged as warnings but don't cause failures.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Configured colour preference, or `None` to auto-detect.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }

    /// Configured markup, if any.
    pub fn markup(&self) -> Option<Markup> {
        self.output.markup
    }

    /// Theme name, falling back to the built-in default.
    pub fn theme(&self) -> &str {
        self.highlight.theme.as_deref().unwrap_or(DEFAULT_THEME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = DefViewConfig::default();
        assert_eq!(config.extractor, ExtractorConfig::default());
        assert!(config.default_format().is_none());
        assert!(config.use_color().is_none());
        assert!(config.markup().is_none());
        assert_eq!(config.theme(), DEFAULT_THEME);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[extractor]
prefix_markers = ["@", "*"]
closing_chars = ["}", "]"]

[output]
format = "json"
color = false
markup = "html"

[highlight]
theme = "InspiredGitHub"
"#;
        let config: DefViewConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.extractor.prefix_markers, vec!['@', '*']);
        assert_eq!(config.extractor.closing_chars, vec!['}', ']']);
        // Unspecified extractor fields keep their defaults
        assert_eq!(
            config.extractor.continuation_chars,
            ExtractorConfig::default().continuation_chars
        );

        assert_eq!(config.default_format(), Some("json"));
        assert_eq!(config.use_color(), Some(false));
        assert_eq!(config.markup(), Some(Markup::Html));
        assert_eq!(config.theme(), "InspiredGitHub");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = DefViewConfig::load(dir.path());
        assert_eq!(config.extractor, ExtractorConfig::default());
    }

    #[test]
    fn test_load_invalid_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[output\nformat = ").unwrap();
        let config = DefViewConfig::load(dir.path());
        assert!(config.default_format().is_none());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[output]\nmarkup = \"plain\"\n",
        )
        .unwrap();
        let config = DefViewConfig::load(dir.path());
        assert_eq!(config.markup(), Some(Markup::Plain));
    }
}
