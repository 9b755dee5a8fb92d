//! The `acrux` command-line interface.
//!
//! Each subcommand loads one ax document, assembles it and hands the result
//! to the output layer. Errors stop the process with status 1.

use std::{fs, path::Path, process};

use clap::Parser;
use log::{debug, info, log_enabled, warn, Level};

use crate::cli::args::{AcruxArgs, Command};
use crate::clues::{Html, Markup, Plain};
use crate::crossword::Crossword;
use crate::document::AxDocument;
use crate::errors::{AcruxError, Result};
use crate::ipuz::{self, Ipuz};
use crate::logging::init_logger;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = AcruxArgs::parse();
    init_logger(args.verbose);

    let result = match args.command {
        Command::Ipuz { input, output } => handle_ipuz(&input, output.as_deref()),
        Command::Check { input } => handle_check(&input),
        Command::Clues { input, plain } => handle_clues(&input, plain),
    };

    if let Err(e) = result {
        output::print_error(e);
        process::exit(1);
    }
}

fn assemble(input: &Path, markup: &dyn Markup) -> Result<Crossword> {
    let doc = AxDocument::load(input)?;
    Crossword::assemble_with(&doc, markup)
}

fn handle_ipuz(input: &Path, out: Option<&Path>) -> Result<()> {
    let xw = assemble(input, &Html)?;
    let ipuz = Ipuz::from_crossword(&xw);
    match out {
        Some(path) => {
            let text = ipuz::to_string(&ipuz)?;
            fs::write(path, text).map_err(|source| AcruxError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            info!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            ipuz::write_ipuz(&ipuz, &mut stdout.lock())?;
        }
    }
    Ok(())
}

fn handle_check(input: &Path) -> Result<()> {
    let xw = assemble(input, &Html)?;
    for clue in xw.unclued() {
        warn!("{} ({}) has no clue", clue.name(), clue.answer);
    }
    if log_enabled!(Level::Debug) {
        let dump = serde_json::to_string_pretty(&xw).map_err(|e| AcruxError::Encode {
            message: e.to_string(),
        })?;
        debug!("assembled {}:\n{dump}", input.display());
    }
    output::print_summary(&input.display().to_string(), &xw).map_err(|source| AcruxError::Io {
        path: "<stdout>".into(),
        source,
    })
}

fn handle_clues(input: &Path, plain: bool) -> Result<()> {
    let markup: &dyn Markup = if plain { &Plain } else { &Html };
    let xw = assemble(input, markup)?;
    output::print_clues(&xw).map_err(|source| AcruxError::Io {
        path: "<stdout>".into(),
        source,
    })
}
