//! Line indexing helpers.
//!
//! Everything the extractor knows about a document comes through these
//! functions: where lines break, where a line's content starts, and how to
//! drop a fixed number of leading columns.

/// Split text into lines on `\n` and `\r\n`.
///
/// Unlike [`str::lines`], a trailing newline yields a trailing empty line and
/// empty input yields a single empty line, so line numbers reported by an
/// editor always index into the result.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Column (in characters) of the first non-whitespace character.
///
/// Returns `None` for empty and whitespace-only lines.
pub fn first_non_whitespace(line: &str) -> Option<usize> {
    line.chars().position(|c| !c.is_whitespace())
}

/// First and last non-whitespace characters of a line.
pub fn edge_chars(line: &str) -> Option<(char, char)> {
    let trimmed = line.trim();
    let first = trimmed.chars().next()?;
    let last = trimmed.chars().next_back()?;
    Some((first, last))
}

/// Drop the first `columns` characters of a line.
///
/// Lines shorter than `columns` become empty.
pub fn strip_columns(line: &str, columns: usize) -> &str {
    match line.char_indices().nth(columns) {
        Some((idx, _)) => &line[idx..],
        None => "",
    }
}
