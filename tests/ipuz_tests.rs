// tests/ipuz_tests.rs

use std::path::Path;

use acrux::ipuz::{self, Ipuz, PuzzleCell};
use acrux::{assemble, AxDocument};

fn sample() -> Ipuz {
    let doc = AxDocument::load(Path::new("tests/data/sample.ax")).unwrap();
    Ipuz::from_crossword(&assemble(&doc).unwrap())
}

#[test]
fn document_shape() {
    let ipuz = sample();
    let value = serde_json::to_value(&ipuz).unwrap();
    assert_eq!(value["version"], "http://ipuz.org/v1");
    assert_eq!(value["kind"][0], "http://ipuz.org/crossword#1");
    assert_eq!(value["title"], "Couch Potato");
    assert_eq!(value["dimensions"]["width"], 5);
    assert_eq!(value["dimensions"]["height"], 3);
    assert_eq!(value["puzzle"][0][0], 1);
    assert_eq!(value["puzzle"][0][4], "#");
    assert_eq!(value["puzzle"][2][1]["style"]["shapebg"], "circle");
    assert_eq!(value["puzzle"][2][1]["cell"], 0);
    assert_eq!(value["solution"][2][1], "O");
    assert_eq!(value["clues"]["Down"][3][0], 5);
    assert_eq!(value["clues"]["Down"][3][1], "Letters in <i>Tess</i>");
}

#[test]
fn numbers_match_the_grid() {
    let ipuz = sample();
    let numbers: Vec<Vec<u32>> = ipuz
        .puzzle
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    PuzzleCell::Number(n) | PuzzleCell::Styled { cell: n, .. } => *n,
                    PuzzleCell::Block(_) => 0,
                })
                .collect()
        })
        .collect();
    assert_eq!(numbers, [[1, 0, 2, 3, 0], [0, 0, 4, 0, 5], [6, 0, 0, 0, 0]]);
}

#[test]
fn aligned_writer_layout() {
    let text = ipuz::to_string(&sample()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], r#"{ "version": "http://ipuz.org/v1""#);
    assert_eq!(lines[1], r#", "kind": ["http://ipuz.org/crossword#1"]"#);
    assert_eq!(lines[2], r#", "title": "Couch Potato""#);
    assert_eq!(lines[3], r#", "author": "A. Setter""#);
    assert_eq!(lines[4], r#", "copyright": "© 2018 A. Setter""#);
    assert_eq!(lines[5], r#", "dimensions": {"width": 5, "height": 3}"#);
    assert_eq!(lines[6], r#", "puzzle":"#);

    // Puzzle rows are padded to a common width.
    let rows = &lines[7..10];
    assert!(rows[0].starts_with("  [ [1, "));
    assert!(rows[1].starts_with("  , [0, "));
    assert!(rows.iter().all(|row| row.len() == rows[0].len()));
    assert_eq!(lines[10], "  ]");

    assert_eq!(
        &lines[11..16],
        [
            r#", "solution":"#,
            r##"  [ ["S", "O", "F", "A", "#"]"##,
            r##"  , ["A", "#", "I", "R", "E"]"##,
            r##"  , ["T", "O", "T", "E", "S"]"##,
            "  ]",
        ]
    );

    assert_eq!(
        &lines[16..22],
        [
            r#", "clues":"#,
            r#"  { "Across":"#,
            r#"    [ [1, "Couch"]"#,
            r#"    , [4, "Anger"]"#,
            r#"    , [6, "Bags &amp; sacks; see also 1- and 2-down"]"#,
            "    ]",
        ]
    );
    assert_eq!(lines[22], r#"  , "Down":"#);
    assert_eq!(lines[lines.len() - 2], "  }");
    assert_eq!(lines[lines.len() - 1], "}");
    assert!(text.ends_with("}\n"));
}

#[test]
fn aligned_output_parses_back_to_the_same_document() {
    let ipuz = sample();
    let text = ipuz::to_string(&ipuz).unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed, serde_json::to_value(&ipuz).unwrap());
}

#[test]
fn write_ipuz_streams_the_same_text() {
    let ipuz = sample();
    let mut out = Vec::new();
    ipuz::write_ipuz(&ipuz, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), ipuz::to_string(&ipuz).unwrap());
}
