//! # Acrux Clue Templates
//!
//! Clue texts in an ax document may refer to other answers and carry light
//! formatting. Expansion is a pure transformation from template text to
//! marked-up text and happens in three layers:
//!
//! - [`parser`] turns template text into [`Segment`]s, reporting malformed
//!   templates with a span;
//! - [`namespace`] binds variable names to answers, once per puzzle;
//! - [`expander`] resolves references and renders through a [`Markup`].

pub mod expander;
pub mod markup;
pub mod namespace;
pub mod parser;

pub use expander::{name_clues, Expander};
pub use markup::{Html, Markup, Plain};
pub use namespace::Namespace;
pub use parser::{parse_template, Conjunction, Segment, Span, VarRef};
