//! # toon_records
//!
//! A Serde-based encoder/decoder for the TOON tabular record format: a
//! compact, line-oriented text notation for homogeneous collections of flat
//! records.
//!
//! ## The format
//!
//! A collection renders as one header line and one indented line per record:
//!
//! ```text
//! users[2]{Id,Name,Role}:
//!   1,Alice,admin
//!   2,Bob,user
//! ```
//!
//! - the root name identifies the collection
//! - `[2]` declares the row count and must match the data lines present
//! - the braced field list fixes the column order
//! - row values are comma-separated; `\,` is a literal comma inside a value
//! - an empty collection is exactly `users[0]{}:`
//!
//! ## Key Features
//!
//! - **Serde Compatible**: works with existing Rust types via
//!   `#[derive(Serialize, Deserialize)]`
//! - **Untyped layer**: the [`Document`] table model parses and renders TOON
//!   standalone, with no typed records involved
//! - **Lenient decoding**: wire field names match struct fields
//!   case-insensitively, and unknown columns are skipped
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon_records::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     role: String,
//! }
//!
//! let users = vec![
//!     User { id: 1, name: "Alice".to_string(), role: "admin".to_string() },
//!     User { id: 2, name: "Bob".to_string(), role: "user".to_string() },
//! ];
//!
//! let toon = to_string(&users, "users").unwrap();
//! assert_eq!(toon, "users[2]{id,name,role}:\n  1,Alice,admin\n  2,Bob,user");
//!
//! let back: Vec<User> = from_str(&toon).unwrap();
//! assert_eq!(users, back);
//! ```
//!
//! ## Working Untyped
//!
//! ```rust
//! use toon_records::Document;
//!
//! let doc = Document::parse("users[1]{Id,Name}:\n  1,Alice").unwrap();
//! assert_eq!(doc.fields, vec!["Id", "Name"]);
//! assert_eq!(doc.rows[0], vec!["1", "Alice"]);
//! ```
//!
//! ## Scope
//!
//! TOON carries tables of scalars. Nested records, sequences inside fields,
//! and non-textual primitive encodings are out of scope; an encoder fed a
//! nested structure reports an unsupported type rather than guessing.

pub mod codec;
pub mod de;
pub mod document;
pub mod error;
pub mod ser;

pub use de::from_document;
pub use document::Document;
pub use error::{Error, Result};
pub use ser::to_document;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serializes a slice of records to a TOON string under the given root name.
///
/// An empty slice yields `"<root>[0]{}:"` with an empty field list, since
/// field names are not knowable without at least one record.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon_records::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let toon = to_string(&[Point { x: 1, y: 2 }], "points").unwrap();
/// assert_eq!(toon, "points[1]{x,y}:\n  1,2");
/// ```
///
/// # Errors
///
/// Returns an error if a record is not a flat struct or string-keyed map,
/// or if records disagree on their field set.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(records: &[T], root_name: &str) -> Result<String>
where
    T: Serialize,
{
    Ok(to_document(records, root_name)?.to_string())
}

/// Serializes a slice of records to a writer in TOON format.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, records: &[T], root_name: &str) -> Result<()>
where
    W: io::Write,
    T: Serialize,
{
    let toon = to_string(records, root_name)?;
    writer
        .write_all(toon.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserializes a TOON string into a `Vec` of records.
///
/// The row count declared in the header and every row's value count are
/// validated before any record is built; on failure no partial results are
/// returned.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toon_records::from_str;
///
/// #[derive(Deserialize, Debug, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// let points: Vec<Point> = from_str("points[1]{x,y}:\n  1,2").unwrap();
/// assert_eq!(points, vec![Point { x: 1, y: 2 }]);
/// ```
///
/// # Errors
///
/// - [`Error::Argument`] if `text` is empty or whitespace-only
/// - [`Error::Format`] if the header is malformed or counts disagree
/// - [`Error::Conversion`] if a value does not parse as its field's type
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(text: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let document = Document::parse(text)?;
    from_document(&document)
}

/// Deserializes TOON records from an I/O stream.
///
/// # Errors
///
/// Returns an error if reading fails or the input is not valid TOON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<Vec<T>>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&text)
}

/// Deserializes TOON records from bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or not valid TOON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(bytes: &[u8]) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let text = std::str::from_utf8(bytes).map_err(|e| Error::custom(e.to_string()))?;
    from_str(text)
}
