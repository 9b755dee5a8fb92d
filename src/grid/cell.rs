//! Cell model and substitution specs.
//!
//! A [`Cell`] is one grid position. Its [`CellContent`] is exactly one of a
//! letter (optionally a rebus with alternate spellings), a block, or an empty
//! void, so the "text xor block xor empty" rule cannot be broken once a cell
//! exists. [`Substitution`] is the authored form found in an ax document's
//! `subs` table; it is checked and turned into a cell once, when the
//! substitution table is built.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{AcruxError, Result};

// ============================================================================
// CELL
// ============================================================================

/// What occupies a grid position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CellContent {
    /// A lettered cell. `options` is present for rebus cells, and its first
    /// entry is always equal to `text`.
    Letter {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        options: Option<Vec<String>>,
    },
    /// A filled square that separates answers.
    Block,
    /// A void inside the bounding rectangle (padding or an irregular shape).
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    content: CellContent,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    style: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<u32>,
}

impl Cell {
    fn from_content(content: CellContent) -> Self {
        Self {
            content,
            style: BTreeSet::new(),
            number: None,
        }
    }

    pub fn letter(text: impl Into<String>) -> Self {
        Self::from_content(CellContent::Letter {
            text: text.into(),
            options: None,
        })
    }

    /// A rebus cell. Returns `None` when `options` is empty.
    pub fn rebus(options: Vec<String>) -> Option<Self> {
        let text = options.first()?.clone();
        Some(Self::from_content(CellContent::Letter {
            text,
            options: Some(options),
        }))
    }

    pub fn block() -> Self {
        Self::from_content(CellContent::Block)
    }

    pub fn empty() -> Self {
        Self::from_content(CellContent::Empty)
    }

    pub fn with_style<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.style.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn content(&self) -> &CellContent {
        &self.content
    }

    /// The canonical letters of this cell, if it is part of the grid proper.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            CellContent::Letter { text, .. } => Some(text),
            CellContent::Block | CellContent::Empty => None,
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match &self.content {
            CellContent::Letter {
                options: Some(options),
                ..
            } => Some(options),
            _ => None,
        }
    }

    pub fn has_text(&self) -> bool {
        matches!(self.content, CellContent::Letter { .. })
    }

    pub fn is_block(&self) -> bool {
        matches!(self.content, CellContent::Block)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.content, CellContent::Empty)
    }

    pub fn style(&self) -> &BTreeSet<String> {
        &self.style
    }

    pub fn has_style(&self, tag: &str) -> bool {
        self.style.contains(tag)
    }

    /// The answer number, present iff an across or down answer starts here.
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    pub(crate) fn set_number(&mut self, number: u32) {
        self.number = Some(number);
    }
}

// ============================================================================
// SUBSTITUTION SPECS
// ============================================================================

/// The explicit attribute form of a substitution entry.
///
/// There is no `number` field; numbers come only from the answer finder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CellSpec {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub style: Vec<String>,
    #[serde(default)]
    pub block: bool,
    #[serde(default)]
    pub empty: bool,
}

impl CellSpec {
    /// Validates the entry and builds the cell it describes.
    ///
    /// `key` is the substitution key, used only for error messages.
    pub fn to_cell(&self, key: &str) -> Result<Cell> {
        let lettered = self.text.is_some() || self.options.is_some();
        let kinds = [lettered, self.block, self.empty]
            .iter()
            .filter(|&&k| k)
            .count();
        if kinds == 0 {
            return Err(AcruxError::substitution(
                key,
                "must set one of text, options, block or empty",
            ));
        }
        if kinds > 1 {
            return Err(AcruxError::substitution(
                key,
                "text, block and empty are mutually exclusive",
            ));
        }

        let cell = if self.block {
            Cell::block()
        } else if self.empty {
            Cell::empty()
        } else if let Some(options) = &self.options {
            match (&self.text, options.first()) {
                (_, None) => {
                    return Err(AcruxError::substitution(key, "options must not be empty"))
                }
                (Some(text), Some(first)) if text != first => {
                    return Err(AcruxError::substitution(
                        key,
                        format!("text '{text}' must equal the first option '{first}'"),
                    ))
                }
                _ => Cell::rebus(options.clone())
                    .ok_or_else(|| AcruxError::substitution(key, "options must not be empty"))?,
            }
        } else {
            match &self.text {
                Some(text) if !text.is_empty() => Cell::letter(text.clone()),
                _ => return Err(AcruxError::substitution(key, "text must not be empty")),
            }
        };

        Ok(cell.with_style(self.style.iter().cloned()))
    }
}

/// One entry of an ax document's `subs` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Substitution {
    /// Replace the key with plain letter text.
    Text(String),
    /// A rebus: the first option is canonical.
    Options(Vec<String>),
    /// Full attribute form.
    Cell(CellSpec),
}

impl Substitution {
    pub fn to_cell(&self, key: &str) -> Result<Cell> {
        match self {
            Substitution::Text(text) if text.is_empty() => {
                Err(AcruxError::substitution(key, "text must not be empty"))
            }
            Substitution::Text(text) => Ok(Cell::letter(text.clone())),
            Substitution::Options(options) => Cell::rebus(options.clone())
                .ok_or_else(|| AcruxError::substitution(key, "options must not be empty")),
            Substitution::Cell(spec) => spec.to_cell(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn rebus_text_is_first_option() {
        let cell = Cell::rebus(vec!["STAR".into(), "S".into()]).unwrap();
        assert_eq!(cell.text(), Some("STAR"));
        assert_eq!(cell.options().unwrap().len(), 2);
        assert!(Cell::rebus(vec![]).is_none());
    }

    #[test]
    fn block_and_empty_have_no_text() {
        assert_eq!(Cell::block().text(), None);
        assert_eq!(Cell::empty().text(), None);
        assert!(Cell::block().is_block());
        assert!(Cell::empty().is_empty());
        assert!(!Cell::letter("A").is_empty());
    }

    #[test]
    fn spec_with_style_keeps_tags() {
        let spec = CellSpec {
            text: Some("O".into()),
            style: vec!["circle".into()],
            ..CellSpec::default()
        };
        let cell = spec.to_cell("o").unwrap();
        assert_eq!(cell.text(), Some("O"));
        assert!(cell.has_style("circle"));
    }

    #[test]
    fn spec_rejects_mixed_kinds() {
        let spec = CellSpec {
            text: Some("A".into()),
            block: true,
            ..CellSpec::default()
        };
        let err = spec.to_cell("x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Substitution);
    }

    #[test]
    fn spec_rejects_nothing_set() {
        let spec = CellSpec {
            style: vec!["circle".into()],
            ..CellSpec::default()
        };
        assert!(spec.to_cell("x").is_err());
    }

    #[test]
    fn spec_rejects_text_disagreeing_with_options() {
        let spec = CellSpec {
            text: Some("B".into()),
            options: Some(vec!["A".into(), "B".into()]),
            ..CellSpec::default()
        };
        assert!(spec.to_cell("x").is_err());
    }

    #[test]
    fn substitution_forms() {
        assert_eq!(
            Substitution::Text("QU".into()).to_cell("q").unwrap().text(),
            Some("QU")
        );
        let rebus = Substitution::Options(vec!["HEART".into(), "H".into()])
            .to_cell("*")
            .unwrap();
        assert_eq!(rebus.text(), Some("HEART"));
        assert!(Substitution::Options(vec![]).to_cell("*").is_err());
    }
}
