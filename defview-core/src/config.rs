//! Character classes that steer the block extractor.
//!
//! Every lexical cue the extractor relies on lives here, so supporting a
//! new language convention means adding a character, not a branch.
//!
//! # Example
//!
//! ```toml
//! [extractor]
//! prefix_markers = ["@", "/", "#", "[", ";", "-", "*"]
//! closing_chars = ["}", "]"]
//! ```

use serde::{Deserialize, Serialize};

/// Allow-lists consulted by [`crate::extract`].
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// First characters of lines that attach to the definition below them:
    /// decorators, doc comments, attributes, line comments.
    pub prefix_markers: Vec<char>,

    /// Last characters of an anchor line that mark a body-less declaration.
    pub declaration_terminators: Vec<char>,

    /// First characters that continue the definition at its own indent
    /// (a closing parameter paren, an opening brace on its own line).
    pub continuation_chars: Vec<char>,

    /// First characters that close the definition at its own indent.
    pub closing_chars: Vec<char>,

    /// First characters signalling that a nested scope opened.
    pub block_open_first_chars: Vec<char>,

    /// Last characters signalling that a nested scope opened.
    pub block_open_last_chars: Vec<char>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            prefix_markers: vec!['@', '/', '#', '[', ';', '-'],
            declaration_terminators: vec![';'],
            continuation_chars: vec!['{', ')'],
            closing_chars: vec!['}'],
            block_open_first_chars: vec!['{'],
            block_open_last_chars: vec![':', '{', ';', '}'],
        }
    }
}

impl ExtractorConfig {
    pub fn is_prefix_marker(&self, c: char) -> bool {
        self.prefix_markers.contains(&c)
    }

    pub fn is_declaration_terminator(&self, c: char) -> bool {
        self.declaration_terminators.contains(&c)
    }

    pub fn is_continuation(&self, c: char) -> bool {
        self.continuation_chars.contains(&c)
    }

    pub fn is_closing(&self, c: char) -> bool {
        self.closing_chars.contains(&c)
    }

    /// Whether a line starting with `first` and ending with `last` opens a scope.
    pub fn opens_block(&self, first: char, last: char) -> bool {
        self.block_open_first_chars.contains(&first) || self.block_open_last_chars.contains(&last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_markers() {
        let config = ExtractorConfig::default();
        for c in ['@', '/', '#', '[', ';', '-'] {
            assert!(config.is_prefix_marker(c), "missing prefix marker {c}");
        }
        assert!(!config.is_prefix_marker('d'));
        assert!(config.is_continuation(')'));
        assert!(config.is_continuation('{'));
        assert!(config.is_closing('}'));
        assert!(config.opens_block('x', ':'));
        assert!(config.opens_block('{', 'x'));
        assert!(!config.opens_block('x', ')'));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: ExtractorConfig =
            serde_json::from_str(r#"{"closing_chars": ["}", "]"]}"#).unwrap();
        assert_eq!(config.closing_chars, vec!['}', ']']);
        assert_eq!(config.prefix_markers, ExtractorConfig::default().prefix_markers);
    }
}
