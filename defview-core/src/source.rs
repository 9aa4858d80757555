//! Document access.
//!
//! The aggregator only needs one capability from its host: open a document
//! by URI. Opening is the single place where extraction may suspend.

use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;

use tracing::debug;

use crate::error::DocumentError;
use crate::language::language_id_for_path;
use crate::types::{TextDocument, Url};

/// Something that can open documents by URI.
pub trait DocumentSource {
    fn open(
        &self,
        uri: &Url,
    ) -> impl Future<Output = Result<TextDocument, DocumentError>> + Send;
}

/// Opens `file://` URLs from the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsDocumentSource;

impl DocumentSource for FsDocumentSource {
    async fn open(&self, uri: &Url) -> Result<TextDocument, DocumentError> {
        let path = uri.to_file_path().map_err(|()| DocumentError::InvalidUri {
            uri: uri.to_string(),
        })?;

        debug!(uri = %uri, path = %path.display(), "opening document");

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => DocumentError::NotFound {
                    uri: uri.to_string(),
                },
                _ => DocumentError::Io {
                    uri: uri.to_string(),
                    source,
                },
            })?;

        Ok(TextDocument::new(
            uri.clone(),
            language_id_for_path(&path),
            &text,
        ))
    }
}

/// Serves documents from memory. Useful for hosts that already hold the
/// text of open buffers, and for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryDocumentSource {
    documents: HashMap<Url, TextDocument>,
}

impl MemoryDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, document: TextDocument) {
        self.documents.insert(document.uri().clone(), document);
    }

    pub fn with(mut self, document: TextDocument) -> Self {
        self.insert(document);
        self
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentSource for MemoryDocumentSource {
    async fn open(&self, uri: &Url) -> Result<TextDocument, DocumentError> {
        self.documents
            .get(uri)
            .cloned()
            .ok_or_else(|| DocumentError::NotFound {
                uri: uri.to_string(),
            })
    }
}
