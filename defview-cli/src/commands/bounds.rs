//! Bounds command - Report where each definition block starts and ends
//!
//! Useful for checking the extractor against a file without highlighting.
//! Lines are 1-based in the table and 0-based in JSON.

use anyhow::{Context, Result};
use colored::Colorize;
use defview_core::{
    display_uri, resolve_block, uri_from_path, DocumentSource, ExtractorConfig, FsDocumentSource,
};
use serde::Serialize;
use std::path::Path;

use crate::anchors::{resolve_anchors, AnchorArg};
use crate::output::{Output, OutputConfig, TableDisplay};

/// Block boundaries for one anchor
#[derive(Debug, Serialize)]
pub struct AnchorBounds {
    /// Target file, or the URI when it is not a local file
    pub uri: String,
    pub anchor_line: u32,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_line: Option<u32>,
    /// Why the target document could not be opened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Boundaries for every anchor, in input order
#[derive(Debug, Serialize)]
pub struct BoundsReport {
    pub file: String,
    pub bounds: Vec<AnchorBounds>,
}

impl TableDisplay for BoundsReport {
    fn to_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} {}\n", "Definition blocks in".bold(), self.file.cyan()));
        output.push_str(&format!("{}\n", "-".repeat(60)));

        if self.bounds.is_empty() {
            output.push_str(&"  No anchors given.\n".dimmed().to_string());
            return output;
        }

        for entry in &self.bounds {
            let anchor = format!("{}:{}", entry.uri, entry.anchor_line + 1);
            match (entry.first_line, entry.last_line, &entry.error) {
                (Some(first), Some(last), _) => {
                    output.push_str(&format!(
                        "  {} {} lines {}-{} ({} lines)\n",
                        anchor.yellow(),
                        "->".dimmed(),
                        first + 1,
                        last + 1,
                        last - first + 1
                    ));
                }
                (_, _, Some(error)) => {
                    output.push_str(&format!(
                        "  {} {} {}\n",
                        anchor.yellow(),
                        "->".dimmed(),
                        error.red()
                    ));
                }
                _ => {
                    output.push_str(&format!(
                        "  {} {} {}\n",
                        anchor.yellow(),
                        "->".dimmed(),
                        "no block".dimmed()
                    ));
                }
            }
        }

        output
    }
}

/// Run the bounds command
pub async fn run(
    file: &Path,
    anchors: &[AnchorArg],
    anchors_json: Option<&str>,
    extractor: ExtractorConfig,
    output: &OutputConfig,
) -> Result<()> {
    let uri = uri_from_path(file)?;
    let viewing = FsDocumentSource
        .open(&uri)
        .await
        .with_context(|| format!("Failed to open file: {}", file.display()))?;

    let anchors = resolve_anchors(&uri, anchors, anchors_json)?;

    let mut bounds = Vec::with_capacity(anchors.len());
    for anchor in &anchors {
        let (target, range) = anchor.target();
        let mut entry = AnchorBounds {
            uri: display_uri(target),
            anchor_line: range.start.line,
            found: false,
            first_line: None,
            last_line: None,
            error: None,
        };
        match resolve_block(&FsDocumentSource, &extractor, &viewing, anchor).await {
            Ok(block) if !block.is_empty() => {
                entry.found = true;
                entry.first_line = Some(block.first_line);
                entry.last_line = Some(block.last_line);
            }
            Ok(_) => {}
            Err(e) => entry.error = Some(e.to_string()),
        }
        bounds.push(entry);
    }

    let report = BoundsReport {
        file: file.display().to_string(),
        bounds,
    };

    Output::new(report, output).render()
}
