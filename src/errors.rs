//! Acrux Error Handling
//!
//! Every failure in the pipeline, from reading an ax document to writing an
//! ipuz file, is reported as an [`AcruxError`]. The type derives both
//! `thiserror::Error` and `miette::Diagnostic`, so the CLI can hand any error
//! straight to `miette::Report` and get source snippets and help text for free.
//!
//! Errors tied to a piece of authored text (clue templates, document syntax)
//! carry the text as a `NamedSource` plus a span. Structural errors (unknown
//! keys, too many clue texts) carry the offending names instead.

use std::{fmt, path::PathBuf, sync::Arc};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::clues::Span;

// ============================================================================
// SOURCE CONTEXT
// ============================================================================

/// Shared source text attached to span-carrying diagnostics.
pub type SourceArc = Arc<NamedSource<String>>;

/// Wraps a piece of source text for use in an error.
pub fn named_source(name: impl AsRef<str>, content: impl Into<String>) -> SourceArc {
    Arc::new(NamedSource::new(name, content.into()))
}

/// Converts a byte span into the `SourceSpan` miette expects.
pub fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::from((span.start, span.end.saturating_sub(span.start)))
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Unified error type for all acrux failure modes.
#[derive(Error, Diagnostic, Debug)]
pub enum AcruxError {
    #[error("Schema error: unrecognized key '{key}'")]
    #[diagnostic(
        code(acrux::schema::unknown_key),
        help("an ax document may only contain: grid, subs, clues, title, author, copyright")
    )]
    UnknownKey { key: String },

    #[error("Schema error: missing required key '{key}'")]
    #[diagnostic(code(acrux::schema::missing_key))]
    MissingKey { key: String },

    #[error("Decode error: {message}")]
    #[diagnostic(code(acrux::document::decode))]
    Decode {
        message: String,
        #[source_code]
        src: SourceArc,
        #[label("could not decode this")]
        span: Option<SourceSpan>,
    },

    #[error("I/O error on '{}': {source}", .path.display())]
    #[diagnostic(code(acrux::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid substitution for '{key}': {reason}")]
    #[diagnostic(
        code(acrux::grid::substitution),
        help("a substitution is a string, a list of strings, or a mapping with text, options, style, block or empty")
    )]
    InvalidSubstitution { key: String, reason: String },

    #[error("Grid error: the grid has no rows")]
    #[diagnostic(code(acrux::grid::shape))]
    GridShape,

    #[error("Clue error: malformed template: {reason}")]
    #[diagnostic(code(acrux::clue::malformed))]
    MalformedTemplate {
        reason: String,
        #[source_code]
        src: SourceArc,
        #[label("{reason}")]
        span: SourceSpan,
    },

    #[error("Clue error: unknown variable '{name}'")]
    #[diagnostic(code(acrux::clue::unknown_variable))]
    UnknownVariable {
        name: String,
        #[source_code]
        src: SourceArc,
        #[label("no answer is bound to this name")]
        span: SourceSpan,
        #[help]
        help: Option<String>,
    },

    #[error("Clue error: '{name}' has {available} occurrence(s), index {index} is out of range")]
    #[diagnostic(code(acrux::clue::occurrence))]
    OccurrenceOutOfRange {
        name: String,
        index: usize,
        available: usize,
        #[source_code]
        src: SourceArc,
        #[label("out of range")]
        span: SourceSpan,
    },

    #[error("Clue error: clue text #{index} was supplied for '{answer}', but the grid has {available} such answer(s)")]
    #[diagnostic(
        code(acrux::clue::overflow),
        help("check the spelling of the answer and the number of clue texts listed for it")
    )]
    ClueOverflow {
        answer: String,
        index: usize,
        available: usize,
    },

    #[error("Encode error: {message}")]
    #[diagnostic(code(acrux::encode))]
    Encode { message: String },
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Coarse error classification, used by callers and tests that only care
/// about which stage failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Schema,
    Decode,
    Io,
    Substitution,
    GridShape,
    Template,
    Lookup,
    Overflow,
    Encode,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Schema => "Schema",
            ErrorKind::Decode => "Decode",
            ErrorKind::Io => "Io",
            ErrorKind::Substitution => "Substitution",
            ErrorKind::GridShape => "GridShape",
            ErrorKind::Template => "Template",
            ErrorKind::Lookup => "Lookup",
            ErrorKind::Overflow => "Overflow",
            ErrorKind::Encode => "Encode",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AcruxError {
    /// Returns the classification for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AcruxError::UnknownKey { .. } | AcruxError::MissingKey { .. } => ErrorKind::Schema,
            AcruxError::Decode { .. } => ErrorKind::Decode,
            AcruxError::Io { .. } => ErrorKind::Io,
            AcruxError::InvalidSubstitution { .. } => ErrorKind::Substitution,
            AcruxError::GridShape => ErrorKind::GridShape,
            AcruxError::MalformedTemplate { .. } => ErrorKind::Template,
            AcruxError::UnknownVariable { .. } | AcruxError::OccurrenceOutOfRange { .. } => {
                ErrorKind::Lookup
            }
            AcruxError::ClueOverflow { .. } => ErrorKind::Overflow,
            AcruxError::Encode { .. } => ErrorKind::Encode,
        }
    }

    pub(crate) fn substitution(key: &str, reason: impl Into<String>) -> Self {
        AcruxError::InvalidSubstitution {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>, src: &SourceArc, span: Span) -> Self {
        AcruxError::MalformedTemplate {
            reason: reason.into(),
            src: Arc::clone(src),
            span: to_source_span(span),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = AcruxError> = std::result::Result<T, E>;
