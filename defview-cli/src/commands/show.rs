//! Show command - Extract definition blocks and print them highlighted
//!
//! Every anchor is expanded to its whole definition (attached comments,
//! attributes and body). The surviving blocks are joined and highlighted
//! in the language of the viewing file.

use anyhow::{Context, Result};
use defview_core::{
    uri_from_path, DefinitionAggregator, DocumentSource, ExtractedBlock, ExtractorConfig,
    FsDocumentSource,
};
use serde::Serialize;
use std::path::Path;

use crate::anchors::{resolve_anchors, AnchorArg};
use crate::highlight::{highlighter_for, Markup};
use crate::output::{Output, OutputConfig, TableDisplay};

/// Extracted definitions and their rendered markup
#[derive(Debug, Serialize)]
pub struct ShowResult {
    /// Viewing document
    pub file: String,
    /// Language the snippet was highlighted as
    pub language_id: String,
    /// Non-empty blocks in anchor order (0-based lines)
    pub blocks: Vec<ExtractedBlock>,
    /// Highlighted snippet, empty when nothing was extracted
    pub markup: String,
}

impl TableDisplay for ShowResult {
    fn to_table(&self) -> String {
        self.markup.clone()
    }
}

/// Options for the show command
pub struct ShowOptions<'a> {
    pub anchors: &'a [AnchorArg],
    pub anchors_json: Option<&'a str>,
    pub markup: Markup,
    pub theme: &'a str,
    pub extractor: ExtractorConfig,
}

/// Run the show command
pub async fn run(file: &Path, options: ShowOptions<'_>, output: &OutputConfig) -> Result<()> {
    let uri = uri_from_path(file)?;
    let viewing = FsDocumentSource
        .open(&uri)
        .await
        .with_context(|| format!("Failed to open file: {}", file.display()))?;

    let anchors = resolve_anchors(&uri, options.anchors, options.anchors_json)?;

    let highlighter = highlighter_for(options.markup, options.theme)?;
    let aggregator =
        DefinitionAggregator::new(FsDocumentSource, highlighter).with_config(options.extractor);

    let aggregation = aggregator.collect(&viewing, &anchors).await;
    let markup = aggregator
        .highlight(&aggregation)
        .context("Failed to highlight definitions")?;

    let result = ShowResult {
        file: file.display().to_string(),
        language_id: aggregation.language_id,
        blocks: aggregation.blocks,
        markup,
    };

    Output::new(result, output).render()
}
