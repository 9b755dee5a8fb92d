//! Variable namespace for clue templates.
//!
//! Built once per puzzle from the answers in discovery order. Bindings map
//! to positions in that answer list:
//!
//! - an answer occurring once is bound by its letters, `SOFA`;
//! - an answer occurring more than once is bound as `AREA[0]`, `AREA[1]`, …
//!   and the bare `AREA` names every occurrence;
//! - every answer is also reachable by position, `12-across` or `3-down`.

use std::collections::BTreeMap;

use crate::clues::parser::VarRef;
use crate::errors::{to_source_span, AcruxError, Result, SourceArc};
use crate::grid::Clue;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    answers: BTreeMap<String, Vec<usize>>,
    positions: BTreeMap<String, usize>,
}

impl Namespace {
    pub fn new(clues: &[Clue]) -> Self {
        let mut namespace = Self::default();
        for (i, clue) in clues.iter().enumerate() {
            namespace
                .answers
                .entry(clue.answer.clone())
                .or_default()
                .push(i);
            namespace.positions.insert(clue.name(), i);
        }
        namespace
    }

    /// Occurrences of `answer` in discovery order.
    pub fn occurrences(&self, answer: &str) -> &[usize] {
        self.answers.get(answer).map(Vec::as_slice).unwrap_or_default()
    }

    /// Resolves a reference to one or more answer positions.
    ///
    /// `src` is the template being expanded, for diagnostics.
    pub fn resolve(&self, var: &VarRef, src: &SourceArc) -> Result<Vec<usize>> {
        let unknown = || AcruxError::UnknownVariable {
            name: var.key(),
            src: SourceArc::clone(src),
            span: to_source_span(var.span),
            help: self.suggest(&var.name),
        };

        match var.index {
            Some(index) => {
                let occurrences = self.answers.get(&var.name).ok_or_else(unknown)?;
                occurrences
                    .get(index)
                    .map(|&i| vec![i])
                    .ok_or_else(|| AcruxError::OccurrenceOutOfRange {
                        name: var.name.clone(),
                        index,
                        available: occurrences.len(),
                        src: SourceArc::clone(src),
                        span: to_source_span(var.span),
                    })
            }
            None => {
                if let Some(occurrences) = self.answers.get(&var.name) {
                    return Ok(occurrences.clone());
                }
                self.positions
                    .get(&var.name)
                    .map(|&i| vec![i])
                    .ok_or_else(unknown)
            }
        }
    }

    /// A near miss for an unknown name: same letters in another case.
    fn suggest(&self, name: &str) -> Option<String> {
        self.answers
            .keys()
            .chain(self.positions.keys())
            .find(|known| known.eq_ignore_ascii_case(name))
            .map(|known| format!("names are case-sensitive; did you mean '{known}'?"))
    }
}
