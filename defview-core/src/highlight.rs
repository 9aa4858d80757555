//! Highlighting seam.
//!
//! The aggregator hands its combined snippet to a [`Highlighter`] exactly
//! once. Tokenizing and theming are up to the implementation.

use crate::error::HighlightError;

/// Turns source text into display markup.
pub trait Highlighter {
    fn highlight(&self, language_id: &str, code: &str) -> Result<String, HighlightError>;
}

/// Returns the code unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, _language_id: &str, code: &str) -> Result<String, HighlightError> {
        Ok(code.to_string())
    }
}

impl<H: Highlighter + ?Sized> Highlighter for &H {
    fn highlight(&self, language_id: &str, code: &str) -> Result<String, HighlightError> {
        (**self).highlight(language_id, code)
    }
}

impl<H: Highlighter + ?Sized> Highlighter for Box<H> {
    fn highlight(&self, language_id: &str, code: &str) -> Result<String, HighlightError> {
        (**self).highlight(language_id, code)
    }
}
