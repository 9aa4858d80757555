//! Syntax highlighting with syntect.
//!
//! Snippets are labelled with an editor language identifier (`csharp`,
//! `shellscript`, ...). syntect knows syntaxes by file extension and name,
//! so identifiers are mapped to a lookup token first and anything unknown
//! falls back to plain text.

use clap::ValueEnum;
use defview_core::{HighlightError, Highlighter, PlainHighlighter};
use serde::Deserialize;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Kind of markup produced for a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    /// 24-bit ANSI escapes for terminals
    Ansi,
    /// Self-contained `<pre>` block with inline styles
    Html,
    /// No highlighting
    Plain,
}

/// Map an editor language identifier to a syntect lookup token.
fn syntax_token(language_id: &str) -> &str {
    match language_id {
        "csharp" => "cs",
        "shellscript" => "sh",
        "javascriptreact" | "typescript" | "typescriptreact" => "js",
        "python" | "gdscript" => "py",
        "rust" => "rs",
        "markdown" => "md",
        "plaintext" => "txt",
        "objective-c" => "m",
        other => other,
    }
}

/// Find the syntax for a language identifier, falling back to plain text.
fn find_syntax<'a>(syntaxes: &'a SyntaxSet, language_id: &str) -> &'a SyntaxReference {
    syntaxes
        .find_syntax_by_token(syntax_token(language_id))
        .or_else(|| syntaxes.find_syntax_by_name(language_id))
        .unwrap_or_else(|| syntaxes.find_syntax_plain_text())
}

/// Syntax definitions plus one theme.
struct Assets {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl Assets {
    fn load(theme_name: &str) -> Result<Self, HighlightError> {
        let mut themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .remove(theme_name)
            .ok_or_else(|| HighlightError::UnknownTheme {
                name: theme_name.to_string(),
            })?;
        Ok(Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }
}

/// Highlights with 24-bit terminal colours.
pub struct TerminalHighlighter {
    assets: Assets,
}

impl TerminalHighlighter {
    pub fn new(theme_name: &str) -> Result<Self, HighlightError> {
        Ok(Self {
            assets: Assets::load(theme_name)?,
        })
    }
}

impl Highlighter for TerminalHighlighter {
    fn highlight(&self, language_id: &str, code: &str) -> Result<String, HighlightError> {
        let syntax = find_syntax(&self.assets.syntaxes, language_id);
        let mut highlighter = HighlightLines::new(syntax, &self.assets.theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(code) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.assets.syntaxes)
                .map_err(|e| HighlightError::Render {
                    message: e.to_string(),
                })?;
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        // Reset so colours do not bleed into whatever is printed next.
        let trailing_newline = output.ends_with('\n');
        if trailing_newline {
            output.pop();
        }
        output.push_str("\x1b[0m");
        if trailing_newline {
            output.push('\n');
        }

        Ok(output)
    }
}

/// Highlights into an HTML `<pre>` block.
pub struct HtmlHighlighter {
    assets: Assets,
}

impl HtmlHighlighter {
    pub fn new(theme_name: &str) -> Result<Self, HighlightError> {
        Ok(Self {
            assets: Assets::load(theme_name)?,
        })
    }
}

impl Highlighter for HtmlHighlighter {
    fn highlight(&self, language_id: &str, code: &str) -> Result<String, HighlightError> {
        let syntax = find_syntax(&self.assets.syntaxes, language_id);
        highlighted_html_for_string(code, &self.assets.syntaxes, syntax, &self.assets.theme)
            .map_err(|e| HighlightError::Render {
                message: e.to_string(),
            })
    }
}

/// Build the highlighter for a markup kind.
pub fn highlighter_for(
    markup: Markup,
    theme_name: &str,
) -> Result<Box<dyn Highlighter>, HighlightError> {
    Ok(match markup {
        Markup::Ansi => Box::new(TerminalHighlighter::new(theme_name)?),
        Markup::Html => Box::new(HtmlHighlighter::new(theme_name)?),
        Markup::Plain => Box::new(PlainHighlighter),
    })
}
