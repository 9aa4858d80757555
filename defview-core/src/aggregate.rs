//! Definition aggregation.
//!
//! A definition lookup can return several locations (overloads, partial
//! classes, declaration plus implementation). The aggregator extracts a
//! block for each, drops the empty ones and joins the rest into a single
//! snippet for the highlighter.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ExtractorConfig;
use crate::error::{DocumentError, HighlightError};
use crate::extract::extract_block;
use crate::highlight::Highlighter;
use crate::source::DocumentSource;
use crate::types::{Anchor, ExtractedBlock, TextDocument};

/// Non-empty blocks for a set of anchors, in anchor order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    /// Language of the document the user is looking at.
    pub language_id: String,
    pub blocks: Vec<ExtractedBlock>,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All blocks joined with one blank line between them.
    ///
    /// Empty when there are no blocks.
    pub fn combined(&self) -> String {
        // Every block already ends with '\n'.
        self.blocks
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Extract the block for a single anchor.
///
/// Anchors into `viewing` reuse it; anything else is opened through `source`.
pub async fn resolve_block<S: DocumentSource>(
    source: &S,
    config: &ExtractorConfig,
    viewing: &TextDocument,
    anchor: &Anchor,
) -> Result<ExtractedBlock, DocumentError> {
    let (uri, range) = anchor.target();

    if uri == viewing.uri() {
        return Ok(extract_block(viewing, range, config));
    }

    let target = source.open(uri).await?;
    Ok(extract_block(&target, range, config))
}

/// Runs the extractor over a list of anchors.
pub struct DefinitionAggregator<S, H> {
    source: S,
    highlighter: H,
    config: ExtractorConfig,
}

impl<S: DocumentSource, H: Highlighter> DefinitionAggregator<S, H> {
    pub fn new(source: S, highlighter: H) -> Self {
        Self {
            source,
            highlighter,
            config: ExtractorConfig::default(),
        }
    }

    /// Builder: use custom extractor settings.
    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract the block for a single anchor, see [`resolve_block`].
    pub async fn extract(
        &self,
        viewing: &TextDocument,
        anchor: &Anchor,
    ) -> Result<ExtractedBlock, DocumentError> {
        resolve_block(&self.source, &self.config, viewing, anchor).await
    }

    /// Extract every anchor, keeping the non-empty blocks in input order.
    ///
    /// Anchors whose document cannot be opened are logged and skipped.
    pub async fn collect(&self, viewing: &TextDocument, anchors: &[Anchor]) -> Aggregation {
        let mut blocks = Vec::with_capacity(anchors.len());

        for anchor in anchors {
            let (uri, range) = anchor.target();
            match self.extract(viewing, anchor).await {
                Ok(block) if block.is_empty() => {
                    debug!(uri = %uri, line = range.start.line, "empty extraction, skipping");
                }
                Ok(block) => blocks.push(block),
                Err(e) => {
                    warn!(uri = %uri, line = range.start.line, "skipping definition: {}", e);
                }
            }
        }

        debug!(anchors = anchors.len(), blocks = blocks.len(), "aggregated definitions");

        Aggregation {
            language_id: viewing.language_id().to_string(),
            blocks,
        }
    }

    /// Highlight an aggregation. Empty aggregations render to an empty string
    /// without consulting the highlighter.
    pub fn highlight(&self, aggregation: &Aggregation) -> Result<String, HighlightError> {
        if aggregation.is_empty() {
            return Ok(String::new());
        }
        self.highlighter
            .highlight(&aggregation.language_id, &aggregation.combined())
    }

    /// Collect and highlight in one step.
    pub async fn render(
        &self,
        viewing: &TextDocument,
        anchors: &[Anchor],
    ) -> Result<String, HighlightError> {
        let aggregation = self.collect(viewing, anchors).await;
        self.highlight(&aggregation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::PlainHighlighter;
    use crate::source::MemoryDocumentSource;
    use crate::types::{LineRange, Range, Url};
    use std::sync::Mutex;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    /// Records what it was asked to highlight.
    #[derive(Default)]
    struct RecordingHighlighter {
        calls: Mutex<Vec<(String, String)>>,
    }

    impl Highlighter for RecordingHighlighter {
        fn highlight(&self, language_id: &str, code: &str) -> Result<String, HighlightError> {
            self.calls
                .lock()
                .unwrap()
                .push((language_id.to_string(), code.to_string()));
            Ok(format!("<{}>{}", language_id, code))
        }
    }

    struct FailingHighlighter;

    impl Highlighter for FailingHighlighter {
        fn highlight(&self, _: &str, _: &str) -> Result<String, HighlightError> {
            Err(HighlightError::Render {
                message: "boom".to_string(),
            })
        }
    }

    fn viewing() -> TextDocument {
        TextDocument::new(
            url("file:///app/main.py"),
            "python",
            "import util\n\n# Adds.\ndef add(a, b):\n    return a + b\n\ndef sub(a, b):\n    return a - b\n",
        )
    }

    fn library() -> TextDocument {
        TextDocument::new(
            url("file:///app/lib.rs"),
            "rust",
            "/// Doubles.\npub fn double(x: u32) -> u32 {\n    x * 2\n}\n",
        )
    }

    #[tokio::test]
    async fn test_filters_empty_blocks_and_keeps_order() {
        let aggregator = DefinitionAggregator::new(MemoryDocumentSource::new(), PlainHighlighter);
        let view = viewing();
        let anchors = vec![
            Anchor::location(url("file:///app/main.py"), Range::at_line(6)),
            Anchor::location(url("file:///app/main.py"), Range::at_line(500)),
            Anchor::location(url("file:///app/main.py"), Range::at_line(3)),
        ];

        let out = aggregator.render(&view, &anchors).await.unwrap();
        assert_eq!(
            out,
            "def sub(a, b):\n    return a - b\n\n# Adds.\ndef add(a, b):\n    return a + b\n"
        );
    }

    #[tokio::test]
    async fn test_duplicate_anchors_are_not_merged() {
        let aggregator = DefinitionAggregator::new(MemoryDocumentSource::new(), PlainHighlighter);
        let view = viewing();
        let anchor = Anchor::location(url("file:///app/main.py"), Range::at_line(6));

        let aggregation = aggregator.collect(&view, &[anchor.clone(), anchor]).await;
        assert_eq!(aggregation.blocks.len(), 2);
        assert_eq!(aggregation.blocks[0], aggregation.blocks[1]);
    }

    #[tokio::test]
    async fn test_cross_document_anchor_uses_viewing_language() {
        let highlighter = RecordingHighlighter::default();
        let source = MemoryDocumentSource::new().with(library());
        let aggregator = DefinitionAggregator::new(source, &highlighter);

        let anchors = vec![Anchor::link(url("file:///app/lib.rs"), Range::lines(1, 3))];
        let out = aggregator.render(&viewing(), &anchors).await.unwrap();

        let expected = "/// Doubles.\npub fn double(x: u32) -> u32 {\n    x * 2\n}\n";
        assert_eq!(out, format!("<python>{}", expected));

        let calls = highlighter.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "python");
    }

    #[tokio::test]
    async fn test_missing_document_is_skipped() {
        let source = MemoryDocumentSource::new().with(library());
        let aggregator = DefinitionAggregator::new(source, PlainHighlighter);

        let anchors = vec![
            Anchor::link(url("file:///app/gone.rs"), Range::at_line(0)),
            Anchor::link(url("file:///app/lib.rs"), Range::at_line(1)),
        ];
        let aggregation = aggregator.collect(&viewing(), &anchors).await;
        assert_eq!(aggregation.blocks.len(), 1);
        assert_eq!(aggregation.blocks[0].uri.as_str(), "file:///app/lib.rs");
        assert_eq!(aggregation.blocks[0].first_line, 0);
        assert_eq!(aggregation.blocks[0].last_line, 3);
    }

    #[tokio::test]
    async fn test_nothing_extracted_renders_empty_without_highlighting() {
        let aggregator = DefinitionAggregator::new(MemoryDocumentSource::new(), FailingHighlighter);

        let anchors = vec![
            Anchor::location(url("file:///app/main.py"), Range::at_line(99)),
            Anchor::link(url("file:///elsewhere.rs"), Range::at_line(0)),
        ];
        let out = aggregator.render(&viewing(), &anchors).await.unwrap();
        assert!(out.is_empty());

        let out = aggregator.render(&viewing(), &[]).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_highlighter_error_propagates() {
        let aggregator = DefinitionAggregator::new(MemoryDocumentSource::new(), FailingHighlighter);
        let anchors = vec![Anchor::location(url("file:///app/main.py"), Range::at_line(3))];
        let err = aggregator.render(&viewing(), &anchors).await.unwrap_err();
        assert!(matches!(err, HighlightError::Render { .. }));
    }

    #[tokio::test]
    async fn test_custom_config_is_used() {
        let doc = TextDocument::new(url("mem://a.c"), "c", "/*\n * Doc.\n */\nint f(void);\n");
        let mut config = ExtractorConfig::default();
        config.prefix_markers.push('*');
        let aggregator = DefinitionAggregator::new(MemoryDocumentSource::new(), PlainHighlighter)
            .with_config(config);

        let anchors = vec![Anchor::location(url("mem://a.c"), Range::at_line(3))];
        let aggregation = aggregator.collect(&doc, &anchors).await;
        assert_eq!(aggregation.blocks[0].first_line, 0);
        assert_eq!(aggregation.language_id, "c");
    }

    #[tokio::test]
    async fn test_resolve_block_without_aggregator() {
        let source = MemoryDocumentSource::new().with(library());
        let config = ExtractorConfig::default();
        let anchor = Anchor::link(url("file:///app/lib.rs"), Range::at_line(1));

        let block = resolve_block(&source, &config, &viewing(), &anchor).await.unwrap();
        assert_eq!((block.first_line, block.last_line), (0, 3));

        let missing = Anchor::link(url("file:///app/gone.rs"), Range::at_line(1));
        let err = resolve_block(&source, &config, &viewing(), &missing).await.unwrap_err();
        assert!(matches!(err, DocumentError::NotFound { .. }));
    }

    #[test]
    fn test_combined_separates_with_blank_line() {
        let block = |text: &str| ExtractedBlock {
            text: text.to_string(),
            ..ExtractedBlock::empty(url("mem://x"))
        };
        let aggregation = Aggregation {
            language_id: "go".to_string(),
            blocks: vec![block("a\n"), block("b\n")],
        };
        assert_eq!(aggregation.combined(), "a\n\nb\n");
        assert_eq!(Aggregation::default().combined(), "");
    }
}
