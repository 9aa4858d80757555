//! Block extraction.
//!
//! Recovers the logical unit around a definition line (attached comments
//! and attributes above it, the full body below it) from indentation and a
//! handful of punctuation cues, with no grammar for any language.
//!
//! The scan works for the two common layouts:
//!
//! - indentation-delimited scopes (the body is indented deeper than the
//!   definition line, the next sibling starts at the same column);
//! - brace-delimited scopes whose braces sit at the definition's own column
//!   or deeper.
//!
//! Anything else (mixed tabs and spaces, unusual brace placement) yields a
//! best-effort span. The result is meant for display, not for compiling.

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::ExtractorConfig;
use crate::lines::{edge_chars, first_non_whitespace, split_lines, strip_columns};
use crate::types::{ExtractedBlock, LineRange, Range, TextDocument};

/// Inclusive line span of an extracted block, plus the dedent width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BlockBounds {
    pub first_line: usize,
    pub last_line: usize,
    pub indent: usize,
}

impl BlockBounds {
    pub fn line_count(&self) -> usize {
        self.last_line - self.first_line + 1
    }
}

/// Find the block around `range.start.line`.
///
/// Returns `None` when the anchor line is past the end of the document.
pub fn block_bounds<S: AsRef<str>>(
    lines: &[S],
    range: Range,
    config: &ExtractorConfig,
) -> Option<BlockBounds> {
    let start = range.start.line as usize;
    let anchor = lines.get(start)?.as_ref();

    // A whitespace-only anchor line has no meaningful column; treat it as 0.
    let indent = first_non_whitespace(anchor).unwrap_or(0);

    let first_line = scan_prefix(lines, start, indent, config);
    let seed = (range.last_covered_line() as usize).clamp(start, lines.len() - 1);
    let last_line = scan_body(lines, start, seed, indent, config);

    debug!(start, first_line, last_line, indent, "block bounds");

    Some(BlockBounds {
        first_line,
        last_line,
        indent,
    })
}

/// Walk upwards from the anchor, collecting attached comment/attribute lines.
fn scan_prefix<S: AsRef<str>>(
    lines: &[S],
    start: usize,
    indent: usize,
    config: &ExtractorConfig,
) -> usize {
    let mut first_line = start;

    for n in (0..start).rev() {
        let line = lines[n].as_ref();

        let (Some(line_indent), Some((first, _))) = (first_non_whitespace(line), edge_chars(line))
        else {
            trace!(line = n, "prefix: blank line");
            break;
        };

        if line_indent < indent {
            trace!(line = n, line_indent, "prefix: dedented");
            break;
        }

        if !config.is_prefix_marker(first) {
            trace!(line = n, first = %first, "prefix: not an attachment marker");
            break;
        }

        first_line = n;
    }

    first_line
}

/// Walk downwards from the anchor until the definition's scope ends.
fn scan_body<S: AsRef<str>>(
    lines: &[S],
    start: usize,
    seed: usize,
    indent: usize,
    config: &ExtractorConfig,
) -> usize {
    let mut last_line = seed;

    // Body-less declarations (interface members, field declarations) end on
    // their own line: the first same-column line stops the scan.
    let mut inside_block = edge_chars(lines[start].as_ref())
        .is_some_and(|(_, last)| config.is_declaration_terminator(last));
    if inside_block {
        trace!(line = start, "body: anchor is a declaration");
    }

    for (n, line) in lines.iter().enumerate().skip(start) {
        let line = line.as_ref();

        let (Some(line_indent), Some((first, last))) = (first_non_whitespace(line), edge_chars(line))
        else {
            continue;
        };

        if line_indent < indent {
            trace!(line = n, line_indent, "body: dedented");
            break;
        }

        if inside_block && line_indent == indent {
            if config.is_continuation(first) {
                trace!(line = n, first = %first, "body: continuation");
                last_line = last_line.max(n);
                continue;
            }
            if config.is_closing(first) {
                trace!(line = n, first = %first, "body: closing delimiter");
                last_line = last_line.max(n);
            } else {
                trace!(line = n, "body: next sibling");
            }
            break;
        }

        if line_indent > indent || config.opens_block(first, last) {
            if !inside_block {
                trace!(line = n, "body: entered block");
            }
            inside_block = true;
        }

        last_line = last_line.max(n);
    }

    last_line
}

/// Slice the block out of `lines`, dedent it and terminate it with `\n`.
pub fn block_text<S: AsRef<str>>(lines: &[S], bounds: &BlockBounds) -> String {
    let mut text = lines[bounds.first_line..=bounds.last_line]
        .iter()
        .map(|line| strip_columns(line.as_ref(), bounds.indent))
        .collect::<Vec<_>>()
        .join("\n");
    text.push('\n');
    text
}

/// Extract the definition block anchored at `range` in `document`.
///
/// An out-of-range anchor gives an empty block.
pub fn extract_block(
    document: &TextDocument,
    range: Range,
    config: &ExtractorConfig,
) -> ExtractedBlock {
    let lines = document.lines();
    match block_bounds(lines, range, config) {
        Some(bounds) => ExtractedBlock {
            uri: document.uri().clone(),
            first_line: bounds.first_line as u32,
            last_line: bounds.last_line as u32,
            indent: bounds.indent as u32,
            text: block_text(lines, &bounds),
        },
        None => {
            debug!(
                uri = %document.uri(),
                line = range.start.line,
                line_count = document.line_count(),
                "anchor past end of document"
            );
            ExtractedBlock::empty(document.uri().clone())
        }
    }
}

/// Extract the block at zero-based `line` of raw `text` with default settings.
pub fn extract_text(text: &str, line: u32) -> String {
    let lines = split_lines(text);
    block_bounds(&lines, Range::at_line(line), &ExtractorConfig::default())
        .map(|bounds| block_text(&lines, &bounds))
        .unwrap_or_default()
}
