//! Anchor arguments.
//!
//! Anchors come either from the command line (`LINE`, `LINE-END`,
//! `PATH:LINE`, `PATH:LINE-END`, all 1-based) or from a JSON definition
//! response (`Location`, `Location[]`, `LocationLink[]` or `null`).

use anyhow::{Context, Result};
use defview_core::{uri_from_path, Anchor, DocumentError, LineRange, Range, Url};
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;
use thiserror::Error;

/// Why an anchor argument was rejected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnchorParseError {
    #[error("'{0}' is not a line number")]
    InvalidLine(String),

    #[error("line numbers start at 1")]
    ZeroLine,

    #[error("end line {end} is before start line {start}")]
    InvertedRange { start: u32, end: u32 },

    #[error("missing path before ':'")]
    EmptyPath,
}

/// One anchor as typed on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorArg {
    /// Target file, `None` for the viewing document.
    pub path: Option<PathBuf>,
    /// 1-based first line.
    pub start: u32,
    /// 1-based last line, inclusive.
    pub end: Option<u32>,
}

impl AnchorArg {
    /// Zero-based range for this anchor.
    pub fn range(&self) -> Range {
        match self.end {
            Some(end) => Range::lines(self.start - 1, end - 1),
            None => Range::at_line(self.start - 1),
        }
    }

    /// Resolve against the viewing document. Anchors without a path point
    /// into it.
    pub fn to_anchor(&self, viewing_uri: &Url) -> Result<Anchor, DocumentError> {
        let uri = match &self.path {
            Some(path) => uri_from_path(path)?,
            None => viewing_uri.clone(),
        };
        Ok(Anchor::location(uri, self.range()))
    }
}

fn parse_line(s: &str) -> Result<u32, AnchorParseError> {
    let line: u32 = s
        .trim()
        .parse()
        .map_err(|_| AnchorParseError::InvalidLine(s.to_string()))?;
    if line == 0 {
        return Err(AnchorParseError::ZeroLine);
    }
    Ok(line)
}

fn parse_lines(s: &str) -> Result<(u32, Option<u32>), AnchorParseError> {
    match s.split_once('-') {
        Some((start, end)) => {
            let start = parse_line(start)?;
            let end = parse_line(end)?;
            if end < start {
                return Err(AnchorParseError::InvertedRange { start, end });
            }
            Ok((start, Some(end)))
        }
        None => Ok((parse_line(s)?, None)),
    }
}

/// Parse `LINE`, `LINE-END`, `PATH:LINE` or `PATH:LINE-END`.
pub fn parse_anchor(s: &str) -> Result<AnchorArg, AnchorParseError> {
    // Split on the last ':' so Windows drive letters stay in the path.
    let (path, lines) = match s.rsplit_once(':') {
        Some((path, lines)) => {
            if path.is_empty() {
                return Err(AnchorParseError::EmptyPath);
            }
            (Some(PathBuf::from(path)), lines)
        }
        None => (None, s),
    };
    let (start, end) = parse_lines(lines)?;
    Ok(AnchorArg { path, start, end })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DefinitionResponse {
    Many(Vec<Anchor>),
    One(Anchor),
}

/// Parse a definition response. `null` means no definitions.
pub fn parse_anchor_json(json: &str) -> Result<Vec<Anchor>> {
    let response: Option<DefinitionResponse> =
        serde_json::from_str(json).context("Invalid definition JSON")?;
    Ok(match response {
        Some(DefinitionResponse::Many(anchors)) => anchors,
        Some(DefinitionResponse::One(anchor)) => vec![anchor],
        None => Vec::new(),
    })
}

/// Read a definition response from a file, or stdin when `source` is `-`.
pub fn load_anchor_json(source: &str) -> Result<Vec<Anchor>> {
    let json = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read anchors from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read anchors file: {}", source))?
    };
    parse_anchor_json(&json)
}

/// Command-line anchors followed by any loaded from JSON, in that order.
pub fn resolve_anchors(
    viewing_uri: &Url,
    args: &[AnchorArg],
    anchors_json: Option<&str>,
) -> Result<Vec<Anchor>> {
    let mut anchors = args
        .iter()
        .map(|arg| arg.to_anchor(viewing_uri))
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(source) = anchors_json {
        anchors.extend(load_anchor_json(source)?);
    }
    tracing::debug!(count = anchors.len(), "resolved anchors");
    Ok(anchors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use defview_core::Position;
    use std::path::Path;

    #[test]
    fn test_parse_bare_line() {
        let arg = parse_anchor("12").unwrap();
        assert_eq!(arg.path, None);
        assert_eq!(arg.start, 12);
        assert_eq!(arg.range(), Range::at_line(11));
    }

    #[test]
    fn test_parse_path_and_range() {
        let arg = parse_anchor("src/lib.rs:3-7").unwrap();
        assert_eq!(arg.path, Some(PathBuf::from("src/lib.rs")));
        assert_eq!((arg.start, arg.end), (3, Some(7)));
        let range = arg.range();
        assert_eq!(range.start, Position::new(2, 0));
        assert_eq!(range.last_covered_line(), 6);
    }

    #[test]
    fn test_parse_windows_path() {
        let arg = parse_anchor(r"C:\src\main.cs:40").unwrap();
        assert_eq!(arg.path, Some(PathBuf::from(r"C:\src\main.cs")));
        assert_eq!(arg.start, 40);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_anchor("0"), Err(AnchorParseError::ZeroLine));
        assert_eq!(
            parse_anchor("a.rs:x"),
            Err(AnchorParseError::InvalidLine("x".to_string()))
        );
        assert_eq!(
            parse_anchor("5-2"),
            Err(AnchorParseError::InvertedRange { start: 5, end: 2 })
        );
        assert_eq!(parse_anchor(":4"), Err(AnchorParseError::EmptyPath));
    }

    #[test]
    fn test_to_anchor_resolves_paths() {
        let viewing_uri = uri_from_path(Path::new("main.py")).unwrap();

        let anchor = parse_anchor("main.py:2").unwrap().to_anchor(&viewing_uri).unwrap();
        assert_eq!(anchor.target().0, &viewing_uri);

        let anchor = parse_anchor("2").unwrap().to_anchor(&viewing_uri).unwrap();
        assert_eq!(anchor.target().0, &viewing_uri);

        let anchor = parse_anchor("lib dir/lib.py:2")
            .unwrap()
            .to_anchor(&viewing_uri)
            .unwrap();
        let (uri, range) = anchor.target();
        assert!(uri.as_str().ends_with("/lib%20dir/lib.py"));
        assert!(uri.to_file_path().unwrap().ends_with("lib dir/lib.py"));
        assert_eq!(range.start.line, 1);
    }

    #[test]
    fn test_parse_anchor_json_shapes() {
        let location = r#"{"uri": "file:///src/a.rs", "range": {"start": {"line": 1, "character": 0}, "end": {"line": 1, "character": 4}}}"#;
        assert_eq!(parse_anchor_json(location).unwrap().len(), 1);

        let many = format!("[{}, {}]", location, location);
        assert_eq!(parse_anchor_json(&many).unwrap().len(), 2);

        assert!(parse_anchor_json("null").unwrap().is_empty());
        assert!(parse_anchor_json("[]").unwrap().is_empty());
        assert!(parse_anchor_json("{\"bogus\": 1}").is_err());

        let escaped = r#"{"targetUri": "file:///src/my%20lib.rs",
            "targetRange": {"start": {"line": 4, "character": 0}, "end": {"line": 9, "character": 1}},
            "targetSelectionRange": {"start": {"line": 4, "character": 7}, "end": {"line": 4, "character": 10}}}"#;
        let anchors = parse_anchor_json(escaped).unwrap();
        let path = anchors[0].target().0.to_file_path().unwrap();
        assert_eq!(path, Path::new("/src/my lib.rs"));
    }
}
