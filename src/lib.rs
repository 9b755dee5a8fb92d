//! # Acrux
//!
//! Core of the ax crossword format. An ax document describes a grid as
//! text, a table of substitutions that turn runs of characters into cells,
//! and clue texts keyed by answer. Assembly tokenizes the grid, numbers the
//! answers, expands the clue templates and yields an immutable
//! [`Crossword`], which can then be exported as ipuz.
//!
//! ```
//! let doc = acrux::AxDocument::from_yaml_str("grid: |\n  ABC\n  DEF\nclues:\n  ABC: See $AD\n")?;
//! let xw = acrux::assemble(&doc)?;
//! assert_eq!(xw.clue("ABC", 0).unwrap().text.as_deref(), Some("See 1-down"));
//! # Ok::<(), acrux::AcruxError>(())
//! ```

pub mod cli;
pub mod clues;
pub mod crossword;
pub mod document;
pub mod errors;
pub mod grid;
pub mod ipuz;
pub mod logging;

pub use crossword::Crossword;
pub use document::{AxDocument, ClueTexts, Format};
pub use errors::{AcruxError, ErrorKind, Result};
pub use grid::{Cell, CellContent, Clue, Direction, Grid};
pub use ipuz::Ipuz;

/// Assembles `doc` with HTML clue markup.
pub fn assemble(doc: &AxDocument) -> Result<Crossword> {
    Crossword::assemble(doc)
}
