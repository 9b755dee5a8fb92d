//! Clue Template Parser
//!
//! Recursive-descent parser for the markup language used in clue texts.
//! Input is read left to right and the first rule that applies wins:
//!
//! | Source            | Segment                                   |
//! |-------------------|-------------------------------------------|
//! | `$$`              | literal `$`                               |
//! | `$NAME`, `$NAME[i]` | reference to one variable               |
//! | `${a & b}`        | references joined with "and"              |
//! | `${a \| b}`       | references joined with "or"               |
//! | `${expr}`         | reference to the variable named `expr`    |
//! | `*text*`          | emphasis around the parsed inner text     |
//! | `\c`              | literal `c`                               |
//! | anything else     | plain text, up to the next `*`, `$`, `\`  |
//!
//! Bare `$NAME` references take letters, digits and underscores. Any
//! other name (`1-across`, say) must be braced.

use crate::errors::{AcruxError, Result, SourceArc};

// ============================================================================
// TEMPLATE AST
// ============================================================================

/// Byte range in a clue template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// How a group of references is read aloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
}

impl Conjunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Conjunction::And => "and",
            Conjunction::Or => "or",
        }
    }
}

/// A variable reference: `name` or `name[index]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRef {
    pub name: String,
    pub index: Option<usize>,
    pub span: Span,
}

impl VarRef {
    /// Splits a trailing `[digits]` off `key`, if there is one.
    pub fn from_key(key: &str, span: Span) -> Self {
        let indexed = key
            .strip_suffix(']')
            .and_then(|rest| rest.rsplit_once('['))
            .filter(|(name, digits)| {
                !name.is_empty() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
            })
            .and_then(|(name, digits)| digits.parse().ok().map(|index| (name, index)));
        match indexed {
            Some((name, index)) => Self {
                name: name.to_string(),
                index: Some(index),
                span,
            },
            None => Self {
                name: key.to_string(),
                index: None,
                span,
            },
        }
    }

    /// The reference as written: `AREA` or `AREA[1]`.
    pub fn key(&self) -> String {
        match self.index {
            Some(index) => format!("{}[{}]", self.name, index),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain text, copied through with markup escaping.
    Text(String, Span),
    /// A single escaped character (`\c` or `$$`).
    Literal(char, Span),
    /// One or more clue references.
    Reference {
        vars: Vec<VarRef>,
        conjunction: Conjunction,
        span: Span,
    },
    /// Emphasized inner segments.
    Emphasis(Vec<Segment>, Span),
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses a clue template into segments.
///
/// `src` is the template wrapped for diagnostics; its content must be `text`.
pub fn parse_template(text: &str, src: &SourceArc) -> Result<Vec<Segment>> {
    let mut parser = TemplateParser { text, pos: 0, src };
    let (segments, closed) = parser.parse_segments(false)?;
    debug_assert!(!closed);
    Ok(segments)
}

// ============================================================================
// PARSER
// ============================================================================

struct TemplateParser<'a> {
    text: &'a str,
    pos: usize,
    src: &'a SourceArc,
}

impl<'a> TemplateParser<'a> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.text[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, reason: &str, start: usize, end: usize) -> AcruxError {
        AcruxError::malformed(reason, self.src, Span::new(start, end))
    }

    /// Parses until end of input, or until the closing `*` when inside an
    /// emphasis span. Returns whether a closing `*` was consumed.
    fn parse_segments(&mut self, in_emphasis: bool) -> Result<(Vec<Segment>, bool)> {
        let mut segments = Vec::new();
        while let Some(c) = self.peek() {
            match c {
                '*' if in_emphasis => {
                    self.bump();
                    return Ok((segments, true));
                }
                '*' => segments.push(self.parse_emphasis()?),
                '\\' => segments.push(self.parse_escape()?),
                '$' => segments.push(self.parse_dollar()?),
                _ => segments.push(self.parse_text()),
            }
        }
        Ok((segments, false))
    }

    fn parse_text(&mut self) -> Segment {
        let start = self.pos;
        let len = self.text[start..]
            .find(['*', '$', '\\'])
            .unwrap_or(self.text.len() - start);
        self.pos += len;
        Segment::Text(
            self.text[start..self.pos].to_string(),
            Span::new(start, self.pos),
        )
    }

    fn parse_escape(&mut self) -> Result<Segment> {
        let start = self.pos;
        self.bump();
        match self.bump() {
            Some(c) => Ok(Segment::Literal(c, Span::new(start, self.pos))),
            None => Err(self.error("'\\' at end of text escapes nothing", start, self.pos)),
        }
    }

    fn parse_emphasis(&mut self) -> Result<Segment> {
        let start = self.pos;
        self.bump();
        let (inner, closed) = self.parse_segments(true)?;
        if !closed {
            return Err(self.error("'*' is never closed", start, start + 1));
        }
        Ok(Segment::Emphasis(inner, Span::new(start, self.pos)))
    }

    fn parse_dollar(&mut self) -> Result<Segment> {
        let start = self.pos;
        match self.peek_second() {
            Some('$') => {
                self.pos += 2;
                Ok(Segment::Literal('$', Span::new(start, self.pos)))
            }
            Some('{') => self.parse_braced(start),
            Some(c) if is_name_char(c) => Ok(self.parse_bare(start)),
            _ => Err(self.error(
                "'$' must be followed by a name, '{' or another '$'",
                start,
                start + 1,
            )),
        }
    }

    /// `$NAME` or `$NAME[i]`.
    fn parse_bare(&mut self, start: usize) -> Segment {
        self.bump();
        let name_start = self.pos;
        while self.peek().is_some_and(is_name_char) {
            self.bump();
        }
        let name = self.text[name_start..self.pos].to_string();

        let index = self.text[self.pos..].strip_prefix('[').and_then(|rest| {
            let close = rest.find(']')?;
            let digits = &rest[..close];
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            digits.parse::<usize>().ok().map(|i| (i, close + 2))
        });
        let index = index.map(|(i, consumed)| {
            self.pos += consumed;
            i
        });

        let span = Span::new(start, self.pos);
        Segment::Reference {
            vars: vec![VarRef { name, index, span }],
            conjunction: Conjunction::And,
            span,
        }
    }

    /// `${...}` with an optional `&` or `|` list inside.
    fn parse_braced(&mut self, start: usize) -> Result<Segment> {
        let body_start = start + 2;
        let Some(close) = self.text[body_start..].find('}') else {
            return Err(self.error("'${' is never closed", start, start + 2));
        };
        let body_end = body_start + close;
        let body = &self.text[body_start..body_end];
        self.pos = body_end + 1;
        let span = Span::new(start, self.pos);

        let (separator, conjunction) = if body.contains('&') {
            (Some('&'), Conjunction::And)
        } else if body.contains('|') {
            (Some('|'), Conjunction::Or)
        } else {
            (None, Conjunction::And)
        };

        let parts: Vec<&str> = match separator {
            Some(sep) => body.split(sep).collect(),
            None => vec![body],
        };

        let mut vars = Vec::with_capacity(parts.len());
        let mut offset = body_start;
        for part in parts {
            let lead = part.len() - part.trim_start().len();
            let key = part.trim();
            let key_start = offset + lead;
            if key.is_empty() {
                let reason = if separator.is_some() {
                    "empty operand in reference list"
                } else {
                    "empty reference"
                };
                return Err(self.error(reason, start, self.pos));
            }
            vars.push(VarRef::from_key(key, Span::new(key_start, key_start + key.len())));
            offset += part.len() + 1;
        }

        Ok(Segment::Reference {
            vars,
            conjunction,
            span,
        })
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{named_source, ErrorKind};

    fn parse(text: &str) -> Result<Vec<Segment>> {
        parse_template(text, &named_source("clue", text))
    }

    fn refs(segment: &Segment) -> (Vec<String>, Conjunction) {
        match segment {
            Segment::Reference {
                vars, conjunction, ..
            } => (vars.iter().map(VarRef::key).collect(), *conjunction),
            other => panic!("expected a reference, got {other:?}"),
        }
    }

    #[test]
    fn plain_text_is_one_segment() {
        let segments = parse("Couch potato's spot").unwrap();
        assert_eq!(segments.len(), 1);
        assert!(matches!(&segments[0], Segment::Text(t, _) if t == "Couch potato's spot"));
    }

    #[test]
    fn bare_reference_stops_at_non_name_characters() {
        let segments = parse("See $SOFA.").unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(refs(&segments[1]).0, vec!["SOFA"]);
        assert_eq!(segments[1], {
            let span = Span::new(4, 9);
            Segment::Reference {
                vars: vec![VarRef {
                    name: "SOFA".into(),
                    index: None,
                    span,
                }],
                conjunction: Conjunction::And,
                span,
            }
        });
    }

    #[test]
    fn bare_reference_takes_an_index() {
        let segments = parse("$AREA[1]!").unwrap();
        let Segment::Reference { vars, .. } = &segments[0] else {
            panic!("expected a reference");
        };
        assert_eq!(vars[0].name, "AREA");
        assert_eq!(vars[0].index, Some(1));
        assert!(matches!(&segments[1], Segment::Text(t, _) if t == "!"));
    }

    #[test]
    fn non_numeric_bracket_is_text() {
        let segments = parse("$AREA[x]").unwrap();
        assert_eq!(refs(&segments[0]).0, vec!["AREA"]);
        assert!(matches!(&segments[1], Segment::Text(t, _) if t == "[x]"));
    }

    #[test]
    fn braced_lists_pick_their_conjunction() {
        let (keys, conj) = refs(&parse("${1-across & 1-down}").unwrap()[0]);
        assert_eq!(keys, vec!["1-across", "1-down"]);
        assert_eq!(conj, Conjunction::And);

        let (keys, conj) = refs(&parse("${A|B[2]|C}").unwrap()[0]);
        assert_eq!(keys, vec!["A", "B[2]", "C"]);
        assert_eq!(conj, Conjunction::Or);
    }

    #[test]
    fn operand_spans_point_at_trimmed_names() {
        let text = "${ AB &  CD }";
        let segments = parse(text).unwrap();
        let Segment::Reference { vars, .. } = &segments[0] else {
            panic!("expected a reference");
        };
        assert_eq!(&text[vars[0].span.start..vars[0].span.end], "AB");
        assert_eq!(&text[vars[1].span.start..vars[1].span.end], "CD");
    }

    #[test]
    fn escapes_and_double_dollar_are_literals() {
        let segments = parse(r"\*\$\\$$").unwrap();
        let chars: Vec<char> = segments
            .iter()
            .map(|s| match s {
                Segment::Literal(c, _) => *c,
                other => panic!("expected a literal, got {other:?}"),
            })
            .collect();
        assert_eq!(chars, vec!['*', '$', '\\', '$']);
    }

    #[test]
    fn emphasis_nests_references() {
        let segments = parse("*Go to $SOFA*").unwrap();
        let Segment::Emphasis(inner, span) = &segments[0] else {
            panic!("expected emphasis");
        };
        assert_eq!(*span, Span::new(0, 13));
        assert_eq!(inner.len(), 2);
        assert_eq!(refs(&inner[1]).0, vec!["SOFA"]);
    }

    #[test]
    fn malformed_templates_are_rejected() {
        for text in ["cost: $", "$ 5", "${SOFA", "*open", r"trailing\", "${}", "${A & }"] {
            let err = parse(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Template, "input {text:?}");
        }
    }

    #[test]
    fn var_ref_from_key() {
        let span = Span::default();
        assert_eq!(VarRef::from_key("AREA[10]", span).index, Some(10));
        assert_eq!(VarRef::from_key("AREA[]", span).index, None);
        assert_eq!(VarRef::from_key("[3]", span).index, None);
        assert_eq!(VarRef::from_key("1-down", span).name, "1-down");
    }

    #[test]
    fn bare_names_accept_accented_letters() {
        let segments = parse("See $CAFÉ, then $NAÏVE[1].").unwrap();
        assert_eq!(refs(&segments[1]).0, vec!["CAFÉ"]);
        assert_eq!(refs(&segments[3]).0, vec!["NAÏVE[1]"]);
        assert!(matches!(&segments[4], Segment::Text(t, _) if t == "."));
    }
}
