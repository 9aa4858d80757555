//! DefView CLI - Show whole definitions for go-to-definition results
//!
//! Expands anchor lines into complete definition blocks (leading comments,
//! attributes, signature and body) and prints them highlighted.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod anchors;
mod commands;
mod config;
mod highlight;
mod output;

use anchors::AnchorArg;
use commands::*;
use config::DefViewConfig;
use highlight::Markup;
use output::{colors_enabled, OutputConfig, OutputFormat};

/// Peek at whole definitions from the command line.
///
/// Give a file and one or more anchor lines (or a definition response as
/// JSON) and DefView prints each complete definition, highlighted in the
/// file's language.
#[derive(Parser)]
#[command(name = "defview")]
#[command(author, version)]
#[command(about = "Show whole definitions for go-to-definition results")]
#[command(propagate_version = true)]
#[command(next_help_heading = "Options")]
#[command(after_help = "Examples:
  defview show src/main.py 12          Definition at line 12
  defview show app.cs 40 lib/Util.cs:8 Local and cross-file anchors
  defview show app.ts --anchors-json -  Anchors from a definition response on stdin
  defview bounds src/lib.rs 3-5        Where does the block start and end?")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Single-line JSON output
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and highlight the definitions at the given anchors
    #[command(visible_alias = "s")]
    Show {
        /// File the definitions are viewed from
        file: PathBuf,

        /// Anchors: LINE, LINE-END, PATH:LINE or PATH:LINE-END (1-based)
        #[arg(value_parser = anchors::parse_anchor, required_unless_present = "anchors_json")]
        anchors: Vec<AnchorArg>,

        /// Read anchors from a definition response (JSON file, or - for stdin)
        #[arg(long, value_name = "PATH")]
        anchors_json: Option<String>,

        /// Markup to produce (defaults to ansi on a terminal, plain otherwise)
        #[arg(short, long, value_enum)]
        markup: Option<Markup>,

        /// Highlighting theme
        #[arg(short, long)]
        theme: Option<String>,
    },

    /// Print the line range of the block at each anchor
    #[command(visible_alias = "b")]
    Bounds {
        /// File the definitions are viewed from
        file: PathBuf,

        /// Anchors: LINE, LINE-END, PATH:LINE or PATH:LINE-END (1-based)
        #[arg(value_parser = anchors::parse_anchor, required_unless_present = "anchors_json")]
        anchors: Vec<AnchorArg>,

        /// Read anchors from a definition response (JSON file, or - for stdin)
        #[arg(long, value_name = "PATH")]
        anchors_json: Option<String>,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

/// Markup for `show`: flag, then config, then plain for JSON or colourless
/// output and ANSI otherwise.
fn resolve_markup(
    flag: Option<Markup>,
    config: &DefViewConfig,
    format: OutputFormat,
    colors: bool,
) -> Markup {
    flag.or_else(|| config.markup()).unwrap_or_else(|| {
        if format == OutputFormat::Json || !colors {
            Markup::Plain
        } else {
            Markup::Ansi
        }
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .defviewrc.toml
    let config = DefViewConfig::load(std::path::Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });
    let mut output = OutputConfig::new(format);
    if cli.compact {
        output = output.compact();
    }

    // Apply color override from config if set
    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::Show {
            file,
            anchors,
            anchors_json,
            markup,
            theme,
        } => {
            let markup = resolve_markup(
                markup,
                &config,
                format,
                colors_enabled(config.use_color()),
            );
            let theme = theme.as_deref().unwrap_or_else(|| config.theme());
            let options = show::ShowOptions {
                anchors: &anchors,
                anchors_json: anchors_json.as_deref(),
                markup,
                theme,
                extractor: config.extractor.clone(),
            };
            show::run(&file, options, &output).await
        }
        Commands::Bounds {
            file,
            anchors,
            anchors_json,
        } => {
            bounds::run(
                &file,
                &anchors,
                anchors_json.as_deref(),
                config.extractor.clone(),
                &output,
            )
            .await
        }
    }
}
