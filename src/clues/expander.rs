//! Clue template expansion.
//!
//! Renders parsed template segments to marked-up text, resolving references
//! against the puzzle's [`Namespace`]. A reference to several answers is
//! read out the way an editor would write it:
//!
//! - two answers in one direction: `1- and 5-across`
//! - two answers in different directions: `1-across and 1-down`
//! - more: `1-, 5-, and 9-across`, or `1-across, 2-down, and 3-across`

use std::borrow::Cow;

use crate::clues::markup::Markup;
use crate::clues::namespace::Namespace;
use crate::clues::parser::{parse_template, Conjunction, Segment};
use crate::errors::{named_source, Result, SourceArc};
use crate::grid::Clue;

/// Expands clue templates for one puzzle.
pub struct Expander<'a> {
    clues: &'a [Clue],
    namespace: Cow<'a, Namespace>,
    markup: &'a dyn Markup,
}

impl<'a> Expander<'a> {
    /// Builds the namespace for `clues` once; `markup` decides escaping and
    /// emphasis.
    pub fn new(clues: &'a [Clue], markup: &'a dyn Markup) -> Self {
        Self {
            clues,
            namespace: Cow::Owned(Namespace::new(clues)),
            markup,
        }
    }

    /// Reuses a namespace already built for `clues`.
    pub fn with_namespace(
        clues: &'a [Clue],
        namespace: &'a Namespace,
        markup: &'a dyn Markup,
    ) -> Self {
        Self {
            clues,
            namespace: Cow::Borrowed(namespace),
            markup,
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Expands `text`. `source_name` labels the text in diagnostics.
    pub fn expand(&self, source_name: &str, text: &str) -> Result<String> {
        let src = named_source(source_name, text);
        let segments = parse_template(text, &src)?;
        let mut out = String::with_capacity(text.len());
        self.render(&segments, &src, &mut out)?;
        Ok(out)
    }

    fn render(&self, segments: &[Segment], src: &SourceArc, out: &mut String) -> Result<()> {
        for segment in segments {
            match segment {
                Segment::Text(text, _) => self.markup.escape(text, out),
                Segment::Literal(c, _) => self.markup.escape(c.encode_utf8(&mut [0; 4]), out),
                Segment::Reference {
                    vars, conjunction, ..
                } => {
                    let mut named = Vec::new();
                    for var in vars {
                        let positions = self.namespace.resolve(var, src)?;
                        named.extend(positions.into_iter().map(|i| &self.clues[i]));
                    }
                    self.markup.escape(&name_clues(&named, *conjunction), out);
                }
                Segment::Emphasis(inner, _) => {
                    let mut rendered = String::new();
                    self.render(inner, src, &mut rendered)?;
                    self.markup.emphasis(&rendered, out);
                }
            }
        }
        Ok(())
    }
}

/// Names a group of clues, joining them with `conjunction`.
pub fn name_clues(clues: &[&Clue], conjunction: Conjunction) -> String {
    let conj = conjunction.as_str();
    let Some((last, init)) = clues.split_last() else {
        return String::new();
    };
    if init.is_empty() {
        return last.name();
    }

    let same_direction = init.iter().all(|c| c.direction == last.direction);
    let head: Vec<String> = init
        .iter()
        .map(|c| {
            if same_direction {
                format!("{}-", c.number)
            } else {
                c.name()
            }
        })
        .collect();

    if head.len() == 1 {
        format!("{} {} {}", head[0], conj, last.name())
    } else {
        format!("{}, {} {}", head.join(", "), conj, last.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clues::markup::{Html, Plain};
    use crate::errors::ErrorKind;
    use crate::grid::Direction;

    fn clue(number: u32, direction: Direction, answer: &str) -> Clue {
        Clue {
            x: 0,
            y: 0,
            number,
            direction,
            answer: answer.to_string(),
            text: None,
        }
    }

    fn sample() -> Vec<Clue> {
        vec![
            clue(1, Direction::Across, "ABC"),
            clue(1, Direction::Down, "AD"),
            clue(2, Direction::Down, "BE"),
            clue(3, Direction::Down, "CF"),
            clue(4, Direction::Across, "AREA"),
            clue(7, Direction::Across, "AREA"),
        ]
    }

    fn expand(text: &str) -> Result<String> {
        let clues = sample();
        Expander::new(&clues, &Html).expand("clue", text)
    }

    #[test]
    fn single_references() {
        assert_eq!(expand("See $ABC").unwrap(), "See 1-across");
        assert_eq!(expand("See $BE.").unwrap(), "See 2-down.");
        assert_eq!(expand("${AREA[1]}").unwrap(), "7-across");
    }

    #[test]
    fn mixed_pair_with_and() {
        assert_eq!(
            expand("See ${1-across & 1-down}").unwrap(),
            "See 1-across and 1-down"
        );
    }

    #[test]
    fn same_direction_pair_elides_first_suffix() {
        assert_eq!(expand("${AD & BE}").unwrap(), "1- and 2-down");
        assert_eq!(expand("${AD | CF}").unwrap(), "1- or 3-down");
    }

    #[test]
    fn longer_lists() {
        assert_eq!(expand("${AD & BE & CF}").unwrap(), "1-, 2-, and 3-down");
        assert_eq!(
            expand("${ABC & BE & AREA[0]}").unwrap(),
            "1-across, 2-down, and 4-across"
        );
    }

    #[test]
    fn bare_repeated_answer_names_all_occurrences() {
        assert_eq!(expand("$AREA").unwrap(), "4- and 7-across");
    }

    #[test]
    fn escapes_produce_plain_characters() {
        assert_eq!(expand(r"\*\$\\").unwrap(), r"*$\");
        assert_eq!(expand("$$5").unwrap(), "$5");
    }

    #[test]
    fn emphasis_and_html_escaping() {
        assert_eq!(
            expand("*Tom & Jerry* <3 $ABC").unwrap(),
            "<i>Tom &amp; Jerry</i> &lt;3 1-across"
        );
        assert_eq!(expand("*See $AD*").unwrap(), "<i>See 1-down</i>");
    }

    #[test]
    fn plain_markup() {
        let clues = sample();
        let expander = Expander::new(&clues, &Plain);
        assert_eq!(
            expander.expand("clue", "*A&B* $CF").unwrap(),
            "_A&B_ 3-down"
        );
    }

    #[test]
    fn borrowed_namespace_expands_the_same() {
        let clues = sample();
        let namespace = Namespace::new(&clues);
        let expander = Expander::with_namespace(&clues, &namespace, &Html);
        assert_eq!(expander.expand("clue", "$AREA & $CF").unwrap(), "4- and 7-across &amp; 3-down");
        assert_eq!(expander.namespace(), &namespace);
    }

    #[test]
    fn unknown_variable_is_a_lookup_error() {
        let err = expand("See $SOFA").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
        let err = expand("${AD & NOPE}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }

    #[test]
    fn name_clues_handles_edge_sizes() {
        assert_eq!(name_clues(&[], Conjunction::And), "");
        let c = clue(9, Direction::Down, "X");
        assert_eq!(name_clues(&[&c], Conjunction::Or), "9-down");
    }
}
