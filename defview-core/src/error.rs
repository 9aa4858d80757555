//! Error types for defview-core.
//!
//! Extraction itself never fails; only the collaborators around it do.

use thiserror::Error;

/// Errors raised while opening a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// No document exists at the given URI.
    #[error("Document not found: {uri}")]
    NotFound {
        /// URI that was requested.
        uri: String,
    },

    /// The URI does not point at anything this source can open.
    #[error("Unsupported document URI: {uri}")]
    InvalidUri {
        /// URI that was requested.
        uri: String,
    },

    /// A local path that cannot be expressed as a `file://` URL.
    #[error("Not a usable file path: {path}")]
    InvalidPath {
        /// Path as given.
        path: String,
    },

    /// Reading the document failed.
    #[error("Failed to read {uri}: {source}")]
    Io {
        /// URI that was requested.
        uri: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while turning a snippet into markup.
#[derive(Error, Debug)]
pub enum HighlightError {
    /// The requested colour theme is not available.
    #[error("Unknown theme: {name}")]
    UnknownTheme {
        /// Theme name that was requested.
        name: String,
    },

    /// The highlighter failed on the input text.
    #[error("Highlighting failed: {message}")]
    Render {
        /// Description of the failure.
        message: String,
    },
}
