//! DefView core - definition snippets without parsers.
//!
//! Given a document and the line a definition starts on (as reported by any
//! go-to-definition facility), this crate recovers the whole definition:
//! attached comments and attributes above it and the complete body below
//! it. It uses only indentation and a few punctuation cues, so the same
//! algorithm serves brace languages, indentation languages and
//! declaration-only files alike.
//!
//! # Features
//!
//! - **Block extraction**: pure function over a line array, see [`extract`]
//! - **Aggregation**: several definitions joined into one snippet, see [`aggregate`]
//! - **Configurable cues**: every marker character lives in [`ExtractorConfig`]
//! - **Pluggable collaborators**: [`DocumentSource`] and [`Highlighter`] traits
//!
//! # Usage
//!
//! ```ignore
//! use defview_core::{uri_from_path, Anchor, DefinitionAggregator, DocumentSource};
//! use defview_core::{FsDocumentSource, LineRange, PlainHighlighter, Range};
//!
//! let viewing = FsDocumentSource.open(&uri_from_path("src/main.rs".as_ref())?).await?;
//! let target = uri_from_path("src/lib.rs".as_ref())?;
//! let anchors = vec![Anchor::location(target, Range::at_line(41))];
//! let aggregator = DefinitionAggregator::new(FsDocumentSource, PlainHighlighter);
//! let snippet = aggregator.render(&viewing, &anchors).await?;
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod highlight;
pub mod language;
pub mod lines;
pub mod source;
pub mod types;

pub use aggregate::{resolve_block, Aggregation, DefinitionAggregator};
pub use config::ExtractorConfig;
pub use error::{DocumentError, HighlightError};
pub use extract::{block_bounds, block_text, extract_block, extract_text, BlockBounds};
pub use highlight::{Highlighter, PlainHighlighter};
pub use source::{DocumentSource, FsDocumentSource, MemoryDocumentSource};
pub use types::{
    display_uri, uri_from_path, Anchor, ExtractedBlock, LineRange, Location, LocationLink,
    Position, Range, TextDocument, Url,
};

/// Get the version of defview-core.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
