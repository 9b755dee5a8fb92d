//! # Acrux Grid
//!
//! Turns the `grid` text of an ax document into a rectangular [`Grid`] of
//! [`Cell`]s and finds the numbered answers in it.
//!
//! - [`tokenizer`] splits lines into cells using the substitution table.
//! - [`Grid::from_rows`] pads ragged rows with empty cells.
//! - [`answers`] scans the grid in row-major order, numbers answer starts and
//!   reads off the across and down letter sequences.

pub mod answers;
pub mod cell;
pub mod tokenizer;

use serde::Serialize;

pub use answers::{find_answers, Clue, Direction};
pub use cell::{Cell, CellContent, CellSpec, Substitution};
pub use tokenizer::SubstitutionTable;

use crate::errors::{AcruxError, Result};

/// A rectangular grid of cells. Every row has the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Grid {
    /// Builds a grid, right-padding short rows with empty cells.
    ///
    /// Ragged input is normalized, never rejected. Zero rows is an error.
    pub fn from_rows(mut rows: Vec<Vec<Cell>>) -> Result<Self> {
        if rows.is_empty() {
            return Err(AcruxError::GridShape);
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize_with(width, Cell::empty);
        }
        Ok(Self { rows, width })
    }

    /// Tokenizes and pads `text` in one step.
    pub fn parse(text: &str, table: &SubstitutionTable) -> Result<Self> {
        Self::from_rows(table.tokenize(text))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// The cell at column `x`, row `y`, if it is inside the rectangle.
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.rows.get(y).and_then(|row| row.get(x))
    }

    pub(crate) fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        self.rows.get_mut(y).and_then(|row| row.get_mut(x))
    }

    /// Whether the position is inside the rectangle and holds letters.
    pub fn has_text(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(Cell::has_text)
    }

    /// Row-major iterator over `(x, y, cell)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, cell)| (x, y, cell)))
    }
}
