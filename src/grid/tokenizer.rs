//! Grid tokenizer.
//!
//! Splits raw grid lines into cells. Substitution keys may be longer than
//! one character (`"(o)"` for a circled letter, say), and when two keys share
//! a prefix the longest one that fits wins. Keys are stored in a character
//! trie; at each position the scan walks the trie as far as the input allows
//! and keeps the deepest node that carries a cell. Anything that matches no
//! key becomes a single-character letter cell.

use std::collections::{BTreeMap, HashMap};

use log::trace;

use crate::errors::{AcruxError, Result};
use crate::grid::cell::{Cell, Substitution};

// ============================================================================
// SUBSTITUTION TRIE
// ============================================================================

#[derive(Debug, Default, Clone)]
struct TrieNode {
    cell: Option<Cell>,
    children: HashMap<char, TrieNode>,
}

/// Longest-match-first lookup table from literal strings to cells.
#[derive(Debug, Clone)]
pub struct SubstitutionTable {
    root: TrieNode,
}

impl Default for SubstitutionTable {
    /// The built-in table: space is an empty cell, `#` is a block.
    fn default() -> Self {
        let mut table = Self {
            root: TrieNode::default(),
        };
        table.insert(" ", Cell::empty());
        table.insert("#", Cell::block());
        table
    }
}

impl SubstitutionTable {
    /// Builds the default table extended (and overridden) by `subs`.
    pub fn with_substitutions(subs: &BTreeMap<String, Substitution>) -> Result<Self> {
        let mut table = Self::default();
        for (key, sub) in subs {
            if key.is_empty() {
                return Err(AcruxError::substitution(key, "key must not be empty"));
            }
            table.insert(key, sub.to_cell(key)?);
        }
        Ok(table)
    }

    /// Adds or replaces the cell for `key`.
    pub fn insert(&mut self, key: &str, cell: Cell) {
        let node = key
            .chars()
            .fold(&mut self.root, |node, c| node.children.entry(c).or_default());
        node.cell = Some(cell);
    }

    /// Returns the longest key that prefixes `input`, with its byte length.
    pub fn longest_match(&self, input: &str) -> Option<(usize, &Cell)> {
        let mut node = &self.root;
        let mut best = None;
        for (offset, c) in input.char_indices() {
            let Some(next) = node.children.get(&c) else {
                break;
            };
            node = next;
            if let Some(cell) = &node.cell {
                best = Some((offset + c.len_utf8(), cell));
            }
        }
        best
    }

    /// Splits one line into cells.
    pub fn tokenize_line(&self, line: &str) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(line.len());
        let mut rest = line;
        while let Some(c) = rest.chars().next() {
            let (len, cell) = match self.longest_match(rest) {
                Some((len, cell)) => (len, cell.clone()),
                None => (c.len_utf8(), Cell::letter(c)),
            };
            trace!("token {:?} -> {:?}", &rest[..len], cell.content());
            cells.push(cell);
            rest = &rest[len..];
        }
        cells
    }

    /// Splits every line of `grid` into cells. Rows are not padded.
    pub fn tokenize(&self, grid: &str) -> Vec<Vec<Cell>> {
        split_lines(grid)
            .into_iter()
            .map(|line| self.tokenize_line(line))
            .collect()
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Splits on every line break, treating `\r\n` as one. A break at the very
/// end does not start another line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let Some(end) = rest.find(is_line_break) else {
            lines.push(rest);
            break;
        };
        lines.push(&rest[..end]);
        let tail = &rest[end..];
        let skip = if tail.starts_with("\r\n") {
            2
        } else {
            tail.chars().next().map_or(1, char::len_utf8)
        };
        rest = &tail[skip..];
    }
    lines
}
