//! The canonical in-memory table representation.
//!
//! A [`Document`] holds a root name, an ordered field list, and ordered rows
//! of string values. It renders to TOON text via `Display` and parses back
//! via [`Document::parse`] (or `FromStr`), so the untyped table round-trip is
//! usable standalone, without any typed record layer on top.
//!
//! ## Wire format
//!
//! ```text
//! users[2]{Id,Name,Role}:
//!   1,Alice,admin
//!   2,Bob,user
//! ```
//!
//! The `[2]` is the declared row count and must match the data lines that
//! follow. Field names are joined with bare commas and carry no escaping;
//! row values are escaped so they may contain literal commas.
//!
//! ## Examples
//!
//! ```rust
//! use toon_records::Document;
//!
//! let doc = Document::parse("users[1]{Id,Name}:\n  1,Alice").unwrap();
//! assert_eq!(doc.root_name, "users");
//! assert_eq!(doc.rows[0][1], "Alice");
//! assert_eq!(Document::parse(&doc.to_string()).unwrap(), doc);
//! ```

use crate::codec;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// The canonical TOON table: root name, ordered fields, ordered rows.
///
/// Rows hold logical (unescaped) values; escaping is applied on render and
/// stripped on parse, so `Document::parse(doc.to_string()) == doc` for any
/// document whose values contain no line breaks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Identifier naming the collection, e.g. `"users"`.
    pub root_name: String,
    /// Field names; order is the column order.
    pub fields: Vec<String>,
    /// One inner vector per record, positionally aligned with `fields`.
    pub rows: Vec<Vec<String>>,
}

impl Document {
    /// Creates an empty document with the given root name.
    #[must_use]
    pub fn new(root_name: impl Into<String>) -> Self {
        Document {
            root_name: root_name.into(),
            fields: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Number of rows, as declared in the rendered header.
    #[must_use]
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Parses TOON text into a document.
    ///
    /// The first line matching the header grammar
    /// `<root>[<n>]{<f1>,<f2>,...}:` establishes the root name, declared
    /// count, and field list. Every following non-blank line is a data line,
    /// split at unescaped commas.
    ///
    /// # Errors
    ///
    /// - [`Error::Argument`] if `text` is empty or all-whitespace
    /// - [`Error::Format`] if no header line matches, a row's value count
    ///   differs from the field count, or the declared count differs from
    ///   the number of data lines
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(Error::argument("Input text cannot be null or empty."));
        }

        let mut lines = text.lines();
        let header = lines
            .by_ref()
            .find_map(|line| parse_header(line.trim()))
            .ok_or_else(|| Error::format("Invalid TOON header format."))?;

        let (root_name, declared, fields) = header;
        let mut document = Document {
            root_name,
            fields,
            rows: Vec::new(),
        };

        for line in lines {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let values: Vec<String> = codec::split_escaped(trimmed)
                .into_iter()
                .map(codec::unescape)
                .collect();

            if values.len() != document.fields.len() {
                return Err(Error::format(format!(
                    "Row '{}' does not match field count ({}).",
                    trimmed,
                    document.fields.len()
                )));
            }
            document.rows.push(values);
        }

        if document.rows.len() != declared {
            return Err(Error::format(format!(
                "Declared count {} does not match actual rows ({}).",
                declared,
                document.rows.len()
            )));
        }

        Ok(document)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]{{{}}}:",
            self.root_name,
            self.count(),
            self.fields.join(",")
        )?;
        for row in &self.rows {
            f.write_str("\n  ")?;
            for (i, value) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                f.write_str(&codec::escape(value))?;
            }
        }
        Ok(())
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Document::parse(s)
    }
}

/// Matches `<identifier>[<digits>]{<fieldlist>}:` against a trimmed line.
///
/// Returns `None` when the line is not a header; the caller keeps scanning.
/// An empty brace pair yields an empty field list.
fn parse_header(line: &str) -> Option<(String, usize, Vec<String>)> {
    let bracket = line.find('[')?;
    let root = &line[..bracket];
    if root.is_empty() || !root.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }

    let rest = &line[bracket + 1..];
    let close = rest.find(']')?;
    let digits = &rest[..close];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let count: usize = digits.parse().ok()?;

    let rest = rest[close + 1..].strip_prefix('{')?;
    let brace = rest.find('}')?;
    let field_list = &rest[..brace];

    // The grammar only anchors at line start; content after the colon is
    // ignored rather than rejected.
    rest[brace + 1..].strip_prefix(':')?;

    let fields = if field_list.trim().is_empty() {
        Vec::new()
    } else {
        field_list.split(',').map(|f| f.trim().to_string()).collect()
    };

    Some((root.to_string(), count, fields))
}
