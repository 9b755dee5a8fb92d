//! The ax document: the authored description of one crossword.
//!
//! ```yaml
//! title: Sample
//! grid: |
//!   SOFA#
//!   AREA
//! subs:
//!   "(o)": {text: O, style: [circle]}
//! clues:
//!   SOFA: Couch
//!   AREA: "Region near the *$SOFA*"
//! ```
//!
//! Top-level keys are checked before anything else is decoded so that a
//! misspelt key is reported by name rather than as a generic decode failure.

use std::{
    collections::BTreeMap,
    fmt, fs,
    io::Read,
    path::{Path, PathBuf},
};

use log::debug;
use miette::SourceSpan;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::errors::{named_source, AcruxError, Result};
use crate::grid::Substitution;

/// Keys an ax document may contain.
pub const DOCUMENT_KEYS: [&str; 6] = ["grid", "subs", "clues", "title", "author", "copyright"];

/// Clue text for one answer: one string, or one per occurrence in discovery
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ClueTexts {
    One(#[serde(deserialize_with = "scalar_text")] String),
    Many(#[serde(deserialize_with = "scalar_list")] Vec<String>),
}

impl ClueTexts {
    pub fn as_slice(&self) -> &[String] {
        match self {
            ClueTexts::One(text) => std::slice::from_ref(text),
            ClueTexts::Many(texts) => texts,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxDocument {
    #[serde(deserialize_with = "scalar_text")]
    pub grid: String,
    #[serde(default)]
    pub subs: BTreeMap<String, Substitution>,
    #[serde(default)]
    pub clues: BTreeMap<String, ClueTexts>,
    #[serde(default, deserialize_with = "optional_scalar_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_text")]
    pub copyright: Option<String>,
}

// ============================================================================
// SCALAR TEXT
// ============================================================================

// `copyright: 2018` or `ORWELL: 1984` decode as numbers; text fields take
// any scalar in its written form.

struct ScalarText(String);

impl<'de> Deserialize<'de> for ScalarText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor).map(ScalarText)
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }
}

fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    ScalarText::deserialize(deserializer).map(|t| t.0)
}

fn optional_scalar_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<ScalarText>::deserialize(deserializer).map(|t| t.map(|t| t.0))
}

fn scalar_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Vec::<ScalarText>::deserialize(deserializer).map(|list| list.into_iter().map(|t| t.0).collect())
}

/// Input syntax of an ax document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// `.json` files are JSON; everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

impl AxDocument {
    /// Loads a document from `path`, or from stdin when `path` is `-`.
    pub fn load(path: &Path) -> Result<Self> {
        let io_error = |source: std::io::Error| AcruxError::Io {
            path: PathBuf::from(path),
            source,
        };
        let (name, source, format) = if path == Path::new("-") {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .map_err(io_error)?;
            ("<stdin>".to_string(), source, Format::Yaml)
        } else {
            let source = fs::read_to_string(path).map_err(io_error)?;
            (path.display().to_string(), source, Format::from_path(path))
        };
        debug!("loading {name} as {format:?}");
        Self::parse(&name, &source, format)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Self::parse("document", source, Format::Yaml)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Self::parse("document", source, Format::Json)
    }

    /// Parses `source` in `format`; `name` labels the source in diagnostics.
    pub fn parse(name: &str, source: &str, format: Format) -> Result<Self> {
        match format {
            Format::Yaml => {
                let value: serde_yaml::Value = serde_yaml::from_str(source)
                    .map_err(|e| yaml_error(name, source, &e))?;
                let keys = match &value {
                    serde_yaml::Value::Mapping(map) => map
                        .keys()
                        .map(|k| match k {
                            serde_yaml::Value::String(s) => s.clone(),
                            other => format!("{other:?}"),
                        })
                        .collect(),
                    _ => Vec::new(),
                };
                check_keys(&keys)?;
                serde_yaml::from_value(value).map_err(|e| yaml_error(name, source, &e))
            }
            Format::Json => {
                let value: serde_json::Value = serde_json::from_str(source)
                    .map_err(|e| json_error(name, source, &e))?;
                let keys = match &value {
                    serde_json::Value::Object(map) => map.keys().cloned().collect(),
                    _ => Vec::new(),
                };
                check_keys(&keys)?;
                serde_json::from_value(value).map_err(|e| json_error(name, source, &e))
            }
        }
    }
}

// ============================================================================
// SCHEMA AND DECODE ERRORS
// ============================================================================

fn check_keys(keys: &[String]) -> Result<()> {
    if let Some(key) = keys.iter().find(|k| !DOCUMENT_KEYS.contains(&k.as_str())) {
        return Err(AcruxError::UnknownKey { key: key.clone() });
    }
    if !keys.iter().any(|k| k == "grid") {
        return Err(AcruxError::MissingKey {
            key: "grid".to_string(),
        });
    }
    Ok(())
}

fn yaml_error(name: &str, source: &str, error: &serde_yaml::Error) -> AcruxError {
    AcruxError::Decode {
        message: error.to_string(),
        src: named_source(name, source),
        span: error
            .location()
            .map(|loc| SourceSpan::from((loc.index().min(source.len()), 0))),
    }
}

fn json_error(name: &str, source: &str, error: &serde_json::Error) -> AcruxError {
    let span = (error.line() > 0).then(|| {
        let line_start: usize = source
            .split_inclusive('\n')
            .take(error.line() - 1)
            .map(str::len)
            .sum();
        let offset = (line_start + error.column().saturating_sub(1)).min(source.len());
        SourceSpan::from((offset, 0))
    });
    AcruxError::Decode {
        message: error.to_string(),
        src: named_source(name, source),
        span,
    }
}
