//! User-facing output for the CLI: clue listings and error reports.

use std::io::{self, Write};

use miette::Report;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::crossword::Crossword;
use crate::errors::AcruxError;
use crate::grid::Clue;

/// Prints both clue lists under coloured headings.
pub fn print_clues(xw: &Crossword) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    print_section(&mut stdout, "Across", xw.across())?;
    writeln!(stdout)?;
    print_section(&mut stdout, "Down", xw.down())
}

fn print_section<'a>(
    out: &mut StandardStream,
    heading: &str,
    clues: impl Iterator<Item = &'a Clue>,
) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    writeln!(out, "{heading}")?;
    out.reset()?;
    for clue in clues {
        write!(out, "{:>3}  ", clue.number)?;
        match &clue.text {
            Some(text) => writeln!(out, "{text}")?,
            None => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
                writeln!(out, "({})", clue.answer)?;
                out.reset()?;
            }
        }
    }
    Ok(())
}

/// Prints the one-line summary for `check`.
pub fn print_summary(name: &str, xw: &Crossword) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    write_summary(&mut stdout, name, xw)
}

fn write_summary(out: &mut impl WriteColor, name: &str, xw: &Crossword) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(out, "ok")?;
    out.reset()?;
    writeln!(
        out,
        " {name}: {}x{}, {} answers ({} across, {} down)",
        xw.width(),
        xw.height(),
        xw.clues().len(),
        xw.across().count(),
        xw.down().count()
    )
}

/// Renders an error with its source snippet on stderr.
pub fn print_error(error: AcruxError) {
    let report = Report::new(error);
    eprintln!("{report:?}");
}
