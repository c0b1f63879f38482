//! Property-based tests for the codec and round-trip guarantees.
//!
//! Generated values stay within the format's carrying capacity: no line
//! breaks (a row is one physical line) and no whitespace at row edges (data
//! lines are trimmed before splitting). Commas and backslashes are fair game.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use toon_records::codec::{escape, unescape};
use toon_records::{from_str, to_string, Document};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct Record {
    id: u32,
    name: String,
    active: bool,
    priority: Option<i32>,
}

fn document_strategy() -> impl Strategy<Value = Document> {
    (
        "[a-z][a-z0-9_]{0,7}",
        prop::collection::vec("[A-Za-z][A-Za-z0-9_]{0,7}", 1..5),
    )
        .prop_flat_map(|(root_name, fields)| {
            let width = fields.len();
            prop::collection::vec(
                prop::collection::vec("[!-~]{1,12}", width..=width),
                0..6,
            )
            .prop_map(move |rows| Document {
                root_name: root_name.clone(),
                fields: fields.clone(),
                rows,
            })
        })
}

proptest! {
    #[test]
    fn prop_unescape_inverts_escape(s in any::<String>()) {
        prop_assert_eq!(unescape(&escape(&s)), s);
    }

    #[test]
    fn prop_escape_leaves_no_bare_commas(s in any::<String>()) {
        let escaped = escape(&s);
        let mut preceded_by_backslash = false;
        for ch in escaped.chars() {
            if ch == ',' {
                prop_assert!(preceded_by_backslash);
            }
            preceded_by_backslash = ch == '\\' && !preceded_by_backslash;
        }
    }

    #[test]
    fn prop_document_round_trips(doc in document_strategy()) {
        let rendered = doc.to_string();
        let parsed = Document::parse(&rendered).unwrap();
        prop_assert_eq!(parsed, doc);
    }

    #[test]
    fn prop_parsed_documents_satisfy_count_invariants(doc in document_strategy()) {
        let parsed = Document::parse(&doc.to_string()).unwrap();
        prop_assert_eq!(parsed.count(), doc.rows.len());
        for row in &parsed.rows {
            prop_assert_eq!(row.len(), parsed.fields.len());
        }
    }

    #[test]
    fn prop_typed_records_round_trip(
        records in prop::collection::vec(
            (any::<u32>(), "[!-~]{0,16}", any::<bool>(), proptest::option::of(any::<i32>()))
                .prop_map(|(id, name, active, priority)| Record { id, name, active, priority }),
            0..8,
        )
    ) {
        let toon = to_string(&records, "records").unwrap();
        let back: Vec<Record> = from_str(&toon).unwrap();
        prop_assert_eq!(back, records);
    }
}
