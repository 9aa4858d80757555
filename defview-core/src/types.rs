//! Data model shared by the extractor, the aggregator and their callers.
//!
//! Positions, ranges and locations are the language server protocol types,
//! so a definition response deserializes straight into `Vec<Anchor>`.
//! Documents are identified by their [`Url`].

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use lsp_types::{Location, LocationLink, Position, Range, Url};

use crate::error::DocumentError;
use crate::language::language_id_for_path;
use crate::lines::split_lines;

/// `file://` URL for a local path. Relative paths are resolved against the
/// current directory.
pub fn uri_from_path(path: &Path) -> Result<Url, DocumentError> {
    let invalid = || DocumentError::InvalidPath {
        path: path.display().to_string(),
    };
    let absolute = std::path::absolute(path).map_err(|_| invalid())?;
    Url::from_file_path(&absolute).map_err(|()| invalid())
}

/// Local path for `file://` URLs, the URL itself otherwise.
pub fn display_uri(uri: &Url) -> String {
    match uri.to_file_path() {
        Ok(path) => path.display().to_string(),
        Err(()) => uri.to_string(),
    }
}

/// Line-oriented helpers on [`Range`].
pub trait LineRange {
    /// Zero-width range at the start of `line`.
    fn at_line(line: u32) -> Self;

    /// Range covering lines `start..=end` entirely.
    fn lines(start: u32, end: u32) -> Self;

    /// Last line that holds at least one character of the range.
    ///
    /// An end at column 0 of a later line does not cover that line.
    fn last_covered_line(&self) -> u32;
}

impl LineRange for Range {
    fn at_line(line: u32) -> Self {
        let pos = Position::new(line, 0);
        Range::new(pos, pos)
    }

    fn lines(start: u32, end: u32) -> Self {
        Range::new(Position::new(start, 0), Position::new(end.max(start) + 1, 0))
    }

    fn last_covered_line(&self) -> u32 {
        if self.end.line > self.start.line && self.end.character == 0 {
            self.end.line - 1
        } else {
            self.end.line.max(self.start.line)
        }
    }
}

/// Where a definition begins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Anchor {
    Link(LocationLink),
    Location(Location),
}

impl Anchor {
    pub fn location(uri: Url, range: Range) -> Self {
        Anchor::Location(Location::new(uri, range))
    }

    /// Link whose selection is the whole target range.
    pub fn link(target_uri: Url, target_range: Range) -> Self {
        Anchor::Link(LocationLink {
            origin_selection_range: None,
            target_uri,
            target_range,
            target_selection_range: target_range,
        })
    }

    /// The document and range the definition lives at.
    pub fn target(&self) -> (&Url, Range) {
        match self {
            Anchor::Location(loc) => (&loc.uri, loc.range),
            Anchor::Link(link) => (&link.target_uri, link.target_range),
        }
    }
}

/// An immutable, line-indexed document.
#[derive(Clone, Debug)]
pub struct TextDocument {
    uri: Url,
    language_id: String,
    lines: Vec<String>,
}

impl TextDocument {
    pub fn new(uri: Url, language_id: impl Into<String>, text: &str) -> Self {
        Self {
            uri,
            language_id: language_id.into(),
            lines: split_lines(text).into_iter().map(str::to_owned).collect(),
        }
    }

    /// Build a document whose language is guessed from the path's extension.
    pub fn from_path(path: &Path, text: &str) -> Result<Self, DocumentError> {
        Ok(Self::new(uri_from_path(path)?, language_id_for_path(path), text))
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Text recovered for one anchor.
///
/// `text` is empty when nothing could be extracted; the line numbers are
/// then meaningless.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedBlock {
    pub uri: Url,
    pub first_line: u32,
    pub last_line: u32,
    /// Columns removed from the start of every line.
    pub indent: u32,
    pub text: String,
}

impl ExtractedBlock {
    pub fn empty(uri: Url) -> Self {
        Self {
            uri,
            first_line: 0,
            last_line: 0,
            indent: 0,
            text: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
