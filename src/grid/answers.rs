//! Answer finder.
//!
//! Numbering follows the usual crossword convention: scan top-to-bottom,
//! left-to-right, and give the next number to every cell where an across or
//! down answer of length two or more begins. Both answers starting at one
//! cell share its number.

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::grid::Grid;

/// Reading direction of an answer. Across sorts before down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }

    fn step(&self, x: usize, y: usize) -> (usize, usize) {
        match self {
            Direction::Across => (x + 1, y),
            Direction::Down => (x, y + 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One direction-specific answer, and eventually its clue text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clue {
    pub x: usize,
    pub y: usize,
    pub number: u32,
    pub direction: Direction,
    /// Letters read off the grid; the lookup key for clue texts.
    pub answer: String,
    /// Expanded clue text, if one was supplied.
    pub text: Option<String>,
}

impl Clue {
    /// Display name such as `12-across`.
    pub fn name(&self) -> String {
        format!("{}-{}", self.number, self.direction)
    }
}

/// Finds every answer in `grid`, writing numbers onto the starting cells.
///
/// Answers come back in discovery order: row-major by start cell, across
/// before down at a shared start.
pub fn find_answers(grid: &mut Grid) -> Vec<Clue> {
    let mut answers = Vec::new();
    let mut number = 0;

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let starts: Vec<Direction> = [Direction::Across, Direction::Down]
                .into_iter()
                .filter(|&dir| starts_answer(grid, x, y, dir))
                .collect();
            if starts.is_empty() {
                continue;
            }

            number += 1;
            if let Some(cell) = grid.get_mut(x, y) {
                cell.set_number(number);
            }
            for direction in starts {
                answers.push(Clue {
                    x,
                    y,
                    number,
                    direction,
                    answer: read_answer(grid, x, y, direction),
                    text: None,
                });
            }
        }
    }

    debug!(
        "found {} answers over {} numbered cells in a {}x{} grid",
        answers.len(),
        number,
        grid.width(),
        grid.height()
    );
    answers
}

/// A run starts here if this cell has text, the previous one does not, and
/// the next one does.
fn starts_answer(grid: &Grid, x: usize, y: usize, direction: Direction) -> bool {
    if !grid.has_text(x, y) {
        return false;
    }
    let previous_has_text = match direction {
        Direction::Across => x > 0 && grid.has_text(x - 1, y),
        Direction::Down => y > 0 && grid.has_text(x, y - 1),
    };
    let (nx, ny) = direction.step(x, y);
    !previous_has_text && grid.has_text(nx, ny)
}

fn read_answer(grid: &Grid, x: usize, y: usize, direction: Direction) -> String {
    let mut answer = String::new();
    let (mut cx, mut cy) = (x, y);
    while let Some(text) = grid.get(cx, cy).and_then(|cell| cell.text()) {
        answer.push_str(text);
        (cx, cy) = direction.step(cx, cy);
    }
    answer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, SubstitutionTable};

    fn grid(text: &str) -> Grid {
        Grid::parse(text, &SubstitutionTable::default()).unwrap()
    }

    fn names(answers: &[Clue]) -> Vec<(String, &str)> {
        answers
            .iter()
            .map(|a| (a.name(), a.answer.as_str()))
            .collect()
    }

    #[test]
    fn two_by_three_numbering() {
        let mut g = grid("ABC\nDEF\n");
        let answers = find_answers(&mut g);
        assert_eq!(
            names(&answers),
            vec![
                ("1-across".to_string(), "ABC"),
                ("1-down".to_string(), "AD"),
                ("2-down".to_string(), "BE"),
                ("3-down".to_string(), "CF"),
            ]
        );
        assert_eq!(g.get(0, 0).unwrap().number(), Some(1));
        assert_eq!(g.get(1, 0).unwrap().number(), Some(2));
        assert_eq!(g.get(2, 0).unwrap().number(), Some(3));
        assert_eq!(g.get(0, 1).unwrap().number(), None);
    }

    #[test]
    fn single_cell_has_no_answers() {
        let mut g = grid("A");
        assert!(find_answers(&mut g).is_empty());
        assert_eq!(g.get(0, 0).unwrap().number(), None);
    }

    #[test]
    fn blocks_split_runs() {
        let mut g = grid("AB#C\nD#EF");
        let answers = find_answers(&mut g);
        assert_eq!(
            names(&answers),
            vec![
                ("1-across".to_string(), "AB"),
                ("1-down".to_string(), "AD"),
                ("2-down".to_string(), "CF"),
                ("3-across".to_string(), "EF"),
            ]
        );
    }

    #[test]
    fn rebus_cells_contribute_canonical_text() {
        let rebus = Cell::rebus(vec!["HEART".into(), "H".into()]).unwrap();
        let mut g = Grid::from_rows(vec![vec![Cell::letter("A"), rebus, Cell::letter("S")]])
            .unwrap();
        let answers = find_answers(&mut g);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].answer, "AHEARTS");
    }

    #[test]
    fn open_grid_numbers_every_run_in_scan_order() {
        let mut g = grid("ABCD\nEFGH\nIJKL");
        let answers = find_answers(&mut g);
        let across = answers
            .iter()
            .filter(|a| a.direction == Direction::Across)
            .count();
        let down = answers
            .iter()
            .filter(|a| a.direction == Direction::Down)
            .count();
        assert_eq!(across, 3);
        assert_eq!(down, 4);
        let numbers: Vec<u32> = answers.iter().map(|a| a.number).collect();
        assert!(numbers.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*numbers.last().unwrap(), 6);
    }

    #[test]
    fn empty_cells_end_runs_like_blocks() {
        let mut g = grid(" AB\nCD ");
        let answers = find_answers(&mut g);
        assert_eq!(
            names(&answers),
            vec![
                ("1-across".to_string(), "AB"),
                ("1-down".to_string(), "AD"),
                ("2-across".to_string(), "CD"),
            ]
        );
    }
}
