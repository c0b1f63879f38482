//! Untyped table model tests: rendering, parsing, and format errors.

use toon_records::{Document, Error};

fn users_document() -> Document {
    Document {
        root_name: "users".to_string(),
        fields: vec!["Id".to_string(), "Name".to_string(), "Role".to_string()],
        rows: vec![
            vec!["1".to_string(), "Alice".to_string(), "admin".to_string()],
            vec!["2".to_string(), "Bob".to_string(), "user".to_string()],
        ],
    }
}

#[test]
fn render_produces_valid_toon_format() {
    let rendered = users_document().to_string();
    assert_eq!(rendered, "users[2]{Id,Name,Role}:\n  1,Alice,admin\n  2,Bob,user");
}

#[test]
fn render_handles_empty_document() {
    let doc = Document::new("empty");
    assert_eq!(doc.to_string(), "empty[0]{}:");
}

#[test]
fn count_returns_number_of_rows() {
    let mut doc = Document::new("n");
    doc.fields = vec!["v".to_string()];
    doc.rows = vec![
        vec!["1".to_string()],
        vec!["2".to_string()],
        vec!["3".to_string()],
    ];
    assert_eq!(doc.count(), 3);
}

#[test]
fn parse_reads_valid_toon_text() {
    let doc = Document::parse("users[2]{Id,Name,Role}:\n  1,Alice,admin\n  2,Bob,user").unwrap();

    assert_eq!(doc.root_name, "users");
    assert_eq!(doc.fields, vec!["Id", "Name", "Role"]);
    assert_eq!(doc.rows.len(), 2);
    assert_eq!(doc.rows[0], vec!["1", "Alice", "admin"]);
    assert_eq!(doc.rows[1], vec!["2", "Bob", "user"]);
}

#[test]
fn parse_rejects_empty_input() {
    assert!(matches!(Document::parse(""), Err(Error::Argument(_))));
    assert!(matches!(Document::parse("   \n  "), Err(Error::Argument(_))));
}

#[test]
fn parse_rejects_invalid_header() {
    let err = Document::parse("users{Id,Name,Role}:\n  1,Alice,admin").unwrap_err();
    match err {
        Error::Format(msg) => assert_eq!(msg, "Invalid TOON header format."),
        other => panic!("expected format error, got {other:?}"),
    }
}

#[test]
fn parse_rejects_row_field_count_mismatch() {
    let err = Document::parse("users[1]{Id,Name,Role}:\n  1,Alice").unwrap_err();
    match err {
        Error::Format(msg) => assert!(msg.contains("does not match field count (3)")),
        other => panic!("expected format error, got {other:?}"),
    }
}

#[test]
fn parse_rejects_declared_count_mismatch() {
    let err = Document::parse("users[3]{Id,Name,Role}:\n  1,Alice,admin\n  2,Bob,user").unwrap_err();
    match err {
        Error::Format(msg) => {
            assert!(msg.contains("Declared count 3 does not match actual rows (2)"));
        }
        other => panic!("expected format error, got {other:?}"),
    }
}

#[test]
fn parse_ignores_blank_lines_between_rows() {
    let doc = Document::parse("users[2]{Id,Name}:\n  1,Alice\n\n   \n  2,Bob\n").unwrap();
    assert_eq!(doc.rows.len(), 2);
}

#[test]
fn parse_locates_header_after_leading_noise() {
    let doc = Document::parse("export generated 2026-08-29\n\nusers[1]{Id,Name}:\n  1,Alice").unwrap();
    assert_eq!(doc.root_name, "users");
    assert_eq!(doc.rows[0][1], "Alice");
}

#[test]
fn parse_ignores_trailing_content_on_header_line() {
    let doc = Document::parse("users[1]{Id,Name}: exported nightly\n  1,Alice").unwrap();
    assert_eq!(doc.root_name, "users");
    assert_eq!(doc.fields, vec!["Id", "Name"]);
    assert_eq!(doc.rows[0], vec!["1", "Alice"]);
}

#[test]
fn parse_accepts_empty_field_list() {
    let doc = Document::parse("empty[0]{}:").unwrap();
    assert_eq!(doc.root_name, "empty");
    assert!(doc.fields.is_empty());
    assert!(doc.rows.is_empty());
}

#[test]
fn parse_accepts_header_with_zero_rows() {
    let doc = Document::parse("users[0]{Id,Name}:").unwrap();
    assert_eq!(doc.fields.len(), 2);
    assert!(doc.rows.is_empty());
}

#[test]
fn parse_unescapes_embedded_commas() {
    let doc = Document::parse("users[1]{Id,Name,Role}:\n  1,Alice\\,Wonderland,admin").unwrap();
    assert_eq!(doc.rows[0][1], "Alice,Wonderland");
}

#[test]
fn render_escapes_embedded_commas() {
    let mut doc = Document::new("users");
    doc.fields = vec!["Id".to_string(), "Name".to_string()];
    doc.rows = vec![vec!["1".to_string(), "Alice,Wonderland".to_string()]];
    assert_eq!(doc.to_string(), "users[1]{Id,Name}:\n  1,Alice\\,Wonderland");
}

#[test]
fn parse_of_render_is_identity() {
    let doc = users_document();
    assert_eq!(Document::parse(&doc.to_string()).unwrap(), doc);

    let mut tricky = Document::new("rows");
    tricky.fields = vec!["a".to_string(), "b".to_string()];
    tricky.rows = vec![vec!["x,y".to_string(), "back\\slash".to_string()]];
    assert_eq!(Document::parse(&tricky.to_string()).unwrap(), tricky);
}

#[test]
fn from_str_trait_delegates_to_parse() {
    let doc: Document = "users[1]{Id}:\n  1".parse().unwrap();
    assert_eq!(doc.rows, vec![vec!["1".to_string()]]);
}
