//! Command-line arguments and subcommands for the `acrux` tool.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "acrux", version, about = "Crossword tools for the ax format.")]
pub struct AcruxArgs {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert an ax document to ipuz.
    Ipuz {
        /// The ax document; `-` reads YAML from stdin.
        #[arg(required = true)]
        input: PathBuf,
        /// Where to write the ipuz file. Defaults to stdout.
        output: Option<PathBuf>,
    },
    /// Assemble a document and report its size.
    Check {
        #[arg(required = true)]
        input: PathBuf,
    },
    /// Print the expanded clue lists.
    Clues {
        #[arg(required = true)]
        input: PathBuf,
        /// Render emphasis as `_text_` instead of HTML.
        #[arg(long)]
        plain: bool,
    },
}
