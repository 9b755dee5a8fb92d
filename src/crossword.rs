//! Crossword assembly.
//!
//! [`Crossword::assemble`] runs the whole pipeline over an [`AxDocument`]:
//! build the substitution table, tokenize and pad the grid, number the
//! answers, then expand and attach the clue texts. Any failure aborts the
//! assembly; a `Crossword` is only ever returned complete.

use log::debug;
use serde::Serialize;

use crate::clues::{Expander, Html, Markup, Namespace};
use crate::document::AxDocument;
use crate::errors::{AcruxError, Result};
use crate::grid::{find_answers, Clue, Direction, Grid, SubstitutionTable};

/// A fully assembled puzzle. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crossword {
    grid: Grid,
    clues: Vec<Clue>,
    #[serde(skip)]
    namespace: Namespace,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    copyright: Option<String>,
}

impl Crossword {
    /// Assembles `doc`, rendering clue markup as HTML.
    pub fn assemble(doc: &AxDocument) -> Result<Self> {
        Self::assemble_with(doc, &Html)
    }

    /// Assembles `doc`, rendering clue markup with `markup`.
    pub fn assemble_with(doc: &AxDocument, markup: &dyn Markup) -> Result<Self> {
        let table = SubstitutionTable::with_substitutions(&doc.subs)?;
        let mut grid = Grid::parse(&doc.grid, &table)?;
        debug!("grid is {}x{}", grid.width(), grid.height());

        let mut clues = find_answers(&mut grid);
        let namespace = Namespace::new(&clues);

        let expanded = attach_texts(doc, &clues, &namespace, markup)?;
        for (position, text) in expanded {
            clues[position].text = Some(text);
        }

        Ok(Self {
            grid,
            clues,
            namespace,
            title: doc.title.clone(),
            author: doc.author.clone(),
            copyright: doc.copyright.clone(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    /// All clues in discovery order.
    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    /// The `index`-th occurrence of `answer`, counting in discovery order.
    pub fn clue(&self, answer: &str, index: usize) -> Option<&Clue> {
        self.namespace
            .occurrences(answer)
            .get(index)
            .map(|&i| &self.clues[i])
    }

    /// Every occurrence of `answer` in discovery order.
    pub fn occurrences<'a>(&'a self, answer: &str) -> impl Iterator<Item = &'a Clue> + 'a {
        self.namespace
            .occurrences(answer)
            .iter()
            .map(move |&i| &self.clues[i])
    }

    pub fn across(&self) -> impl Iterator<Item = &Clue> {
        self.in_direction(Direction::Across)
    }

    pub fn down(&self) -> impl Iterator<Item = &Clue> {
        self.in_direction(Direction::Down)
    }

    /// Clues that were given no text.
    pub fn unclued(&self) -> impl Iterator<Item = &Clue> {
        self.clues.iter().filter(|c| c.text.is_none())
    }

    fn in_direction(&self, direction: Direction) -> impl Iterator<Item = &Clue> {
        self.clues.iter().filter(move |c| c.direction == direction)
    }
}

/// Expands every supplied clue text, returning `(clue position, text)` pairs.
fn attach_texts(
    doc: &AxDocument,
    clues: &[Clue],
    namespace: &Namespace,
    markup: &dyn Markup,
) -> Result<Vec<(usize, String)>> {
    let expander = Expander::with_namespace(clues, namespace, markup);
    let mut expanded = Vec::new();

    for (answer, texts) in &doc.clues {
        let positions = namespace.occurrences(answer);
        let texts = texts.as_slice();
        for (i, text) in texts.iter().enumerate() {
            let &position = positions.get(i).ok_or_else(|| AcruxError::ClueOverflow {
                answer: answer.clone(),
                index: i,
                available: positions.len(),
            })?;
            let source_name = if texts.len() == 1 {
                format!("clue {answer}")
            } else {
                format!("clue {answer}[{i}]")
            };
            let text = expander.expand(&source_name, text)?;
            debug!("{} ({}): {}", clues[position].name(), answer, text);
            expanded.push((position, text));
        }
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(grid: &str, clues: &[(&str, &[&str])]) -> AxDocument {
        AxDocument {
            grid: grid.to_string(),
            clues: clues
                .iter()
                .map(|(answer, texts)| {
                    (
                        answer.to_string(),
                        crate::document::ClueTexts::Many(
                            texts.iter().map(|t| t.to_string()).collect(),
                        ),
                    )
                })
                .collect(),
            ..AxDocument::default()
        }
    }

    #[test]
    fn occurrence_lookup_follows_discovery_order() {
        let xw = Crossword::assemble(&doc(
            "AREA\n#X#X\nAREA",
            &[("AREA", &["Top", "Bottom"])],
        ))
        .unwrap();
        assert_eq!(xw.clue("AREA", 0).unwrap().y, 0);
        assert_eq!(xw.clue("AREA", 1).unwrap().y, 2);
        assert_eq!(xw.clue("AREA", 1).unwrap().text.as_deref(), Some("Bottom"));
        assert!(xw.clue("AREA", 2).is_none());
        assert_eq!(xw.occurrences("AREA").count(), 2);
    }

    #[test]
    fn lookups_share_the_expansion_namespace() {
        let xw = Crossword::assemble(&doc(
            "AREA\n#X#X\nAREA",
            &[("AREA", &["Top", "Not ${AREA[0]}"])],
        ))
        .unwrap();
        assert_eq!(xw.namespace, Namespace::new(xw.clues()));
        assert_eq!(xw.namespace.occurrences("AREA"), [0, 3]);
        assert_eq!(xw.clue("AREA", 1).unwrap().text.as_deref(), Some("Not 1-across"));
    }

    #[test]
    fn clues_without_text_stay_empty() {
        let xw = Crossword::assemble(&doc("AB\nCD", &[("AB", &["First"])])).unwrap();
        assert_eq!(xw.unclued().count(), 3);
        assert_eq!(xw.across().count(), 2);
        assert_eq!(xw.down().count(), 2);
    }

    #[test]
    fn overflow_reports_answer_and_index() {
        let err = Crossword::assemble(&doc("AB\nCD", &[("AB", &["One", "Two"])])).unwrap_err();
        assert!(matches!(
            err,
            AcruxError::ClueOverflow { ref answer, index: 1, available: 1 } if answer == "AB"
        ));
    }
}
