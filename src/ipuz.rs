//! ipuz export.
//!
//! [`Ipuz`] is the ipuz v1 crossword document for an assembled
//! [`Crossword`]. It serialises as ordinary JSON through serde, and
//! [`write_ipuz`] writes it in a hand-aligned layout where every grid row
//! sits on its own line and grid cells line up in columns:
//!
//! ```text
//! { "version": "http://ipuz.org/v1"
//! , "kind": ["http://ipuz.org/crossword#1"]
//! , "dimensions": {"width": 2, "height": 2}
//! , "puzzle":
//!   [ [1,   0  ]
//!   , [0,   "#"]
//!   ]
//! ...
//! ```

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::Formatter;
use unicode_width::UnicodeWidthStr;

use crate::crossword::Crossword;
use crate::errors::{AcruxError, Result};
use crate::grid::{Cell, CellContent, Direction};

pub const IPUZ_VERSION: &str = "http://ipuz.org/v1";
pub const IPUZ_KIND: &str = "http://ipuz.org/crossword#1";

const BLOCK: &str = "#";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ipuz {
    pub version: String,
    pub kind: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    pub dimensions: Dimensions,
    pub puzzle: Vec<Vec<PuzzleCell>>,
    /// Block cells are `"#"`, empty cells `null`.
    pub solution: Vec<Vec<Option<String>>>,
    pub clues: IpuzClues,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

/// One cell of the `puzzle` grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PuzzleCell {
    /// Clue number, or 0.
    Number(u32),
    Styled { cell: u32, style: CellStyle },
    Block(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellStyle {
    pub shapebg: String,
}

/// `[number, text]` pairs in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IpuzClues {
    #[serde(rename = "Across")]
    pub across: Vec<(u32, Option<String>)>,
    #[serde(rename = "Down")]
    pub down: Vec<(u32, Option<String>)>,
}

impl PuzzleCell {
    fn from_cell(cell: &Cell) -> Self {
        let number = cell.number().unwrap_or(0);
        if cell.is_block() {
            PuzzleCell::Block(BLOCK.to_string())
        } else if cell.has_style("circle") {
            PuzzleCell::Styled {
                cell: number,
                style: CellStyle {
                    shapebg: "circle".to_string(),
                },
            }
        } else {
            PuzzleCell::Number(number)
        }
    }
}

fn solution_cell(cell: &Cell) -> Option<String> {
    match cell.content() {
        CellContent::Block => Some(BLOCK.to_string()),
        CellContent::Letter { text, .. } => Some(text.clone()),
        CellContent::Empty => None,
    }
}

impl Ipuz {
    pub fn from_crossword(xw: &Crossword) -> Self {
        let rows = xw.grid().rows();
        let puzzle = rows
            .iter()
            .map(|row| row.iter().map(PuzzleCell::from_cell).collect())
            .collect();
        let solution = rows
            .iter()
            .map(|row| row.iter().map(solution_cell).collect())
            .collect();

        let mut clues = IpuzClues::default();
        for clue in xw.clues() {
            let list = match clue.direction {
                Direction::Across => &mut clues.across,
                Direction::Down => &mut clues.down,
            };
            list.push((clue.number, clue.text.clone()));
        }

        Self {
            version: IPUZ_VERSION.to_string(),
            kind: vec![IPUZ_KIND.to_string()],
            title: xw.title().map(str::to_string),
            author: xw.author().map(str::to_string),
            copyright: xw.copyright().map(str::to_string),
            dimensions: Dimensions {
                width: xw.width(),
                height: xw.height(),
            },
            puzzle,
            solution,
            clues,
        }
    }
}

// ============================================================================
// ALIGNED WRITER
// ============================================================================

/// Compact JSON with a space after every `,` and `:`.
#[derive(Debug, Clone, Copy, Default)]
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut ser).map_err(|e| AcruxError::Encode {
        message: e.to_string(),
    })?;
    String::from_utf8(buf).map_err(|e| AcruxError::Encode {
        message: e.to_string(),
    })
}

fn encode_io(error: io::Error) -> AcruxError {
    AcruxError::Encode {
        message: error.to_string(),
    }
}

/// Writes `ipuz` in the aligned layout.
pub fn write_ipuz<W: Write>(ipuz: &Ipuz, out: &mut W) -> Result<()> {
    write_aligned(ipuz, out).map_err(|e| match e {
        WriteError::Io(e) => encode_io(e),
        WriteError::Acrux(e) => e,
    })
}

/// Renders `ipuz` in the aligned layout.
pub fn to_string(ipuz: &Ipuz) -> Result<String> {
    let mut buf = Vec::new();
    write_ipuz(ipuz, &mut buf)?;
    String::from_utf8(buf).map_err(|e| AcruxError::Encode {
        message: e.to_string(),
    })
}

enum WriteError {
    Io(io::Error),
    Acrux(AcruxError),
}

impl From<io::Error> for WriteError {
    fn from(e: io::Error) -> Self {
        WriteError::Io(e)
    }
}

impl From<AcruxError> for WriteError {
    fn from(e: AcruxError) -> Self {
        WriteError::Acrux(e)
    }
}

fn write_aligned<W: Write>(ipuz: &Ipuz, out: &mut W) -> Result<(), WriteError> {
    writeln!(out, "{{ \"version\": {}", to_json(&ipuz.version)?)?;
    writeln!(out, ", \"kind\": {}", to_json(&ipuz.kind)?)?;
    let metadata = [
        ("title", &ipuz.title),
        ("author", &ipuz.author),
        ("copyright", &ipuz.copyright),
    ];
    for (key, value) in metadata {
        if let Some(value) = value {
            writeln!(out, ", \"{key}\": {}", to_json(value)?)?;
        }
    }
    writeln!(out, ", \"dimensions\": {}", to_json(&ipuz.dimensions)?)?;

    write_grid(out, "puzzle", &ipuz.puzzle)?;
    write_grid(out, "solution", &ipuz.solution)?;

    writeln!(out, ", \"clues\":")?;
    writeln!(out, "  {{ \"Across\":")?;
    write_clue_list(out, &ipuz.clues.across)?;
    writeln!(out, "  , \"Down\":")?;
    write_clue_list(out, &ipuz.clues.down)?;
    writeln!(out, "  }}")?;
    writeln!(out, "}}")?;
    Ok(())
}

fn write_grid<W: Write, T: Serialize>(
    out: &mut W,
    key: &str,
    grid: &[Vec<T>],
) -> Result<(), WriteError> {
    let cells = grid
        .iter()
        .map(|row| row.iter().map(to_json).collect::<Result<Vec<_>>>())
        .collect::<Result<Vec<_>>>()?;
    let max_width = cells
        .iter()
        .flatten()
        .map(|cell| cell.width())
        .max()
        .unwrap_or(0);
    let padding = |cell: &str| " ".repeat(max_width - cell.width());

    writeln!(out, ", \"{key}\":")?;
    for (y, row) in cells.iter().enumerate() {
        out.write_all(if y == 0 { b"  [ " } else { b"  , " })?;
        out.write_all(b"[")?;
        for (x, cell) in row.iter().enumerate() {
            if x > 0 {
                write!(out, ", {}", padding(&row[x - 1]))?;
            }
            out.write_all(cell.as_bytes())?;
        }
        if let Some(last) = row.last() {
            out.write_all(padding(last).as_bytes())?;
        }
        out.write_all(b"]\n")?;
    }
    writeln!(out, "  ]")?;
    Ok(())
}

fn write_clue_list<W: Write>(
    out: &mut W,
    clues: &[(u32, Option<String>)],
) -> Result<(), WriteError> {
    for (i, clue) in clues.iter().enumerate() {
        let prefix = if i == 0 { "    [ " } else { "    , " };
        writeln!(out, "{prefix}{}", to_json(clue)?)?;
    }
    writeln!(out, "    ]")?;
    Ok(())
}
