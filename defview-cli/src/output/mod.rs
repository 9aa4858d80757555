//! Output formatting module for DefView CLI
//!
//! Commands produce a serializable result and pick how it is printed:
//! table (human-readable) or json (machine-readable).
//!
//! Automatically detects TTY context to decide on colors.

use clap::ValueEnum;
use serde::Serialize;
use std::io::IsTerminal;
use std::str::FromStr;

mod json;

pub use self::json::JsonOutput;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format (default)
    #[default]
    Table,
    /// JSON format for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Configuration for output rendering
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// The output format to use
    pub format: OutputFormat,
    /// Compact mode (single-line JSON)
    pub compact: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with the specified format
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            compact: false,
        }
    }

    /// Builder: enable compact mode
    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }
}

/// Types that can be displayed by a command.
///
/// JSON rendering comes for free from `Serialize`.
pub trait TableDisplay: Serialize {
    /// Convert to human-readable string
    fn to_table(&self) -> String;
}

/// Result wrapper for formatted output with automatic format selection
pub struct Output<T> {
    data: T,
    config: OutputConfig,
}

impl<T: TableDisplay> Output<T> {
    /// Create a new output wrapper with the given config
    pub fn new(data: T, config: &OutputConfig) -> Self {
        Self {
            data,
            config: config.clone(),
        }
    }

    /// Get the rendered string without printing
    pub fn render_to_string(&self) -> String {
        match self.config.format {
            OutputFormat::Table => self.data.to_table(),
            OutputFormat::Json => JsonOutput::format(&self.data, &self.config),
        }
    }

    /// Render the output to stdout. Empty renders print nothing.
    pub fn render(&self) -> anyhow::Result<()> {
        let rendered = self.render_to_string();
        if rendered.is_empty() {
            return Ok(());
        }
        if rendered.ends_with('\n') {
            print!("{}", rendered);
        } else {
            println!("{}", rendered);
        }
        Ok(())
    }
}

/// Whether colors should be used: explicit preference, else TTY detection.
pub fn colors_enabled(preference: Option<bool>) -> bool {
    preference.unwrap_or_else(|| std::io::stdout().is_terminal())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: String,
    }

    impl TableDisplay for Sample {
        fn to_table(&self) -> String {
            format!("name: {}", self.name)
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TABLE".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_table_and_json() {
        let table = Output::new(
            Sample {
                name: "x".to_string(),
            },
            &OutputConfig::new(OutputFormat::Table),
        );
        assert_eq!(table.render_to_string(), "name: x");

        let json = Output::new(
            Sample {
                name: "x".to_string(),
            },
            &OutputConfig::new(OutputFormat::Json).compact(),
        );
        let value: serde_json::Value = serde_json::from_str(&json.render_to_string()).unwrap();
        assert_eq!(value["name"], "x");
    }

    #[test]
    fn test_colors_enabled_override() {
        assert!(colors_enabled(Some(true)));
        assert!(!colors_enabled(Some(false)));
    }
}
