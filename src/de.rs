//! TOON decoding.
//!
//! This module turns a parsed [`Document`] into typed records. The table
//! grammar itself lives in [`Document::parse`]; decoding only maps columns
//! onto the target type's fields and converts each token.
//!
//! Field-name matching against struct fields is case-insensitive, so wire
//! headers like `{Id,Name,Role}` fill Rust fields named `id`, `name`, `role`.
//! Wire columns with no matching field are skipped. The resolved column
//! mapping is built once per document and reused for every row.
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde::Deserialize;
//! use toon_records::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct User { id: u32, name: String }
//!
//! let users: Vec<User> = from_str("users[1]{Id,Name}:\n  1,Alice").unwrap();
//! assert_eq!(users[0].name, "Alice");
//! ```

use crate::{Document, Error, Result};
use indexmap::IndexMap;
use serde::de::value::StrDeserializer;
use serde::de::{self, Deserialize, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

/// Column mapping resolved against a struct's expected field names:
/// canonical field name, in wire order, to column index.
type Columns = IndexMap<&'static str, usize>;

/// Decodes every row of a document into a `T`.
///
/// Rows are returned in line order. String fields borrow from the document
/// where the target type allows it.
///
/// # Errors
///
/// Returns [`Error::Format`] when a row's value count differs from the
/// field count (documents are plain data and can be built by hand, not only
/// by `Document::parse`), [`Error::Conversion`] when a token does not parse
/// as its target field's type, or any error the target's `Deserialize` impl
/// raises. No partial results are returned.
pub fn from_document<'de, T>(document: &'de Document) -> Result<Vec<T>>
where
    T: Deserialize<'de>,
{
    for row in &document.rows {
        if row.len() != document.fields.len() {
            return Err(Error::format(format!(
                "Row '{}' does not match field count ({}).",
                row.join(","),
                document.fields.len()
            )));
        }
    }

    let mut columns = None;
    let mut records = Vec::with_capacity(document.rows.len());

    for row in &document.rows {
        records.push(T::deserialize(RecordDeserializer {
            fields: &document.fields,
            row,
            columns: &mut columns,
        })?);
    }

    Ok(records)
}

/// Deserializer for a single row of a document.
struct RecordDeserializer<'de, 'a> {
    fields: &'de [String],
    row: &'de [String],
    columns: &'a mut Option<Columns>,
}

impl<'de, 'a> de::Deserializer<'de> for RecordDeserializer<'de, 'a> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    /// Map targets receive every wire column verbatim, in wire order.
    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(FullRowAccess {
            entries: self.fields.iter().zip(self.row.iter()),
            pending: None,
        })
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        expected: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let columns = self.columns.get_or_insert_with(|| {
            let mut map = Columns::with_capacity(self.fields.len());
            for (index, wire_name) in self.fields.iter().enumerate() {
                // Lenient on casing from the wire; unmatched columns are
                // skipped rather than rejected.
                if let Some(&name) = expected.iter().find(|f| f.eq_ignore_ascii_case(wire_name)) {
                    map.insert(name, index);
                }
            }
            map
        });

        visitor.visit_map(MappedRowAccess {
            row: self.row,
            columns: columns.iter(),
            pending: None,
        })
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct enum identifier ignored_any
    }
}

/// `MapAccess` over the columns resolved for a struct target.
struct MappedRowAccess<'de, 'a> {
    row: &'de [String],
    columns: indexmap::map::Iter<'a, &'static str, usize>,
    pending: Option<usize>,
}

impl<'de, 'a> de::MapAccess<'de> for MappedRowAccess<'de, 'a> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.columns.next() {
            Some((&name, &index)) => {
                self.pending = Some(index);
                let key: StrDeserializer<'de, Error> = name.into_deserializer();
                seed.deserialize(key).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let index = self
            .pending
            .take()
            .ok_or_else(|| Error::custom("next_value_seed called without next_key_seed"))?;
        seed.deserialize(TokenDeserializer {
            token: &self.row[index],
        })
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.columns.len())
    }
}

/// `MapAccess` over all wire columns, for map targets.
struct FullRowAccess<'de> {
    entries: std::iter::Zip<std::slice::Iter<'de, String>, std::slice::Iter<'de, String>>,
    pending: Option<&'de str>,
}

impl<'de> de::MapAccess<'de> for FullRowAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.entries.next() {
            Some((name, token)) => {
                self.pending = Some(token);
                let key: StrDeserializer<'de, Error> = name.as_str().into_deserializer();
                seed.deserialize(key).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let token = self
            .pending
            .take()
            .ok_or_else(|| Error::custom("next_value_seed called without next_key_seed"))?;
        seed.deserialize(TokenDeserializer { token })
    }
}

/// Deserializer for one value token, implementing the string-to-scalar
/// conversion rules.
///
/// An empty token yields the target type's zero value for numbers, booleans,
/// and chars, and `None` for options; strings pass through unchanged. A
/// non-empty token that does not parse as its target is a conversion error.
struct TokenDeserializer<'de> {
    token: &'de str,
}

impl<'de> de::Deserializer<'de> for TokenDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.token)
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.token.is_empty() {
            return visitor.visit_bool(false);
        }
        match self.token {
            "true" => visitor.visit_bool(true),
            "false" => visitor.visit_bool(false),
            _ => Err(Error::conversion(self.token, "boolean")),
        }
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.token.is_empty() {
            return visitor.visit_i64(0);
        }
        let value = self
            .token
            .parse::<i64>()
            .map_err(|_| Error::conversion(self.token, "integer"))?;
        visitor.visit_i64(value)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.token.is_empty() {
            return visitor.visit_u64(0);
        }
        let value = self
            .token
            .parse::<u64>()
            .map_err(|_| Error::conversion(self.token, "unsigned integer"))?;
        visitor.visit_u64(value)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_f64(visitor)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.token.is_empty() {
            return visitor.visit_f64(0.0);
        }
        let value = self
            .token
            .parse::<f64>()
            .map_err(|_| Error::conversion(self.token, "number"))?;
        visitor.visit_f64(value)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.token.is_empty() {
            return visitor.visit_char(char::default());
        }
        let mut chars = self.token.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => visitor.visit_char(ch),
            _ => Err(Error::conversion(self.token, "char")),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.token)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.token)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.token.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    /// Unit-variant enums convert from the variant's name.
    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_enum(self.token.into_deserializer())
    }

    fn deserialize_seq<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(not_a_scalar_target("sequence"))
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(not_a_scalar_target("map"))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(not_a_scalar_target("nested struct"))
    }

    forward_to_deserialize_any! {
        i128 u128 bytes byte_buf tuple tuple_struct identifier ignored_any
    }
}

fn not_a_scalar_target(target: &str) -> Error {
    Error::unsupported_type(format!(
        "TOON field values are scalars and cannot fill a {}",
        target
    ))
}
