//! TOON encoding.
//!
//! This module turns a slice of flat records into a [`Document`]. Each record
//! serializes through [`RecordSerializer`], which accepts structs and
//! string-keyed maps only; every field value goes through [`ValueSerializer`],
//! which renders scalars to their locale-invariant textual form. The first
//! record fixes the field list for the whole output.
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde::Serialize;
//! use toon_records::to_string;
//!
//! #[derive(Serialize)]
//! struct User { id: u32, name: String }
//!
//! let users = vec![User { id: 1, name: "Alice".to_string() }];
//! let toon = to_string(&users, "users").unwrap();
//! assert_eq!(toon, "users[1]{id,name}:\n  1,Alice");
//! ```

use crate::{Document, Error, Result};
use serde::ser::{self, Impossible, Serialize};

/// Builds a [`Document`] from a sequence of records.
///
/// An empty slice yields an empty document: field names are not knowable
/// without at least one instance.
///
/// # Errors
///
/// - [`Error::UnsupportedType`] if a record is not a struct or map, or a
///   field value is not a scalar
/// - [`Error::Format`] if a record produces a different field set than the
///   first record
pub fn to_document<T>(records: &[T], root_name: &str) -> Result<Document>
where
    T: Serialize,
{
    let mut document = Document::new(root_name);

    for (index, record) in records.iter().enumerate() {
        let entries = record.serialize(RecordSerializer)?;

        if index == 0 {
            document.fields = entries.iter().map(|(name, _)| name.clone()).collect();
        } else if entries.len() != document.fields.len()
            || entries
                .iter()
                .zip(&document.fields)
                .any(|((name, _), field)| name != field)
        {
            return Err(Error::format(format!(
                "Record {} does not match the field set of the first record.",
                index
            )));
        }

        document
            .rows
            .push(entries.into_iter().map(|(_, value)| value).collect());
    }

    Ok(document)
}

/// Serializes a single record into ordered `(field name, value text)` pairs.
///
/// Only structs and string-keyed maps are records; everything else is an
/// unsupported type.
pub struct RecordSerializer;

impl ser::Serializer for RecordSerializer {
    type Ok = Vec<(String, String)>;
    type Error = Error;

    type SerializeSeq = Impossible<Self::Ok, Error>;
    type SerializeTuple = Impossible<Self::Ok, Error>;
    type SerializeTupleStruct = Impossible<Self::Ok, Error>;
    type SerializeTupleVariant = Impossible<Self::Ok, Error>;
    type SerializeMap = RowCollector;
    type SerializeStruct = RowCollector;
    type SerializeStructVariant = Impossible<Self::Ok, Error>;

    fn serialize_bool(self, _v: bool) -> Result<Self::Ok> {
        Err(not_a_record("bool"))
    }

    fn serialize_i8(self, _v: i8) -> Result<Self::Ok> {
        Err(not_a_record("integer"))
    }

    fn serialize_i16(self, _v: i16) -> Result<Self::Ok> {
        Err(not_a_record("integer"))
    }

    fn serialize_i32(self, _v: i32) -> Result<Self::Ok> {
        Err(not_a_record("integer"))
    }

    fn serialize_i64(self, _v: i64) -> Result<Self::Ok> {
        Err(not_a_record("integer"))
    }

    fn serialize_u8(self, _v: u8) -> Result<Self::Ok> {
        Err(not_a_record("integer"))
    }

    fn serialize_u16(self, _v: u16) -> Result<Self::Ok> {
        Err(not_a_record("integer"))
    }

    fn serialize_u32(self, _v: u32) -> Result<Self::Ok> {
        Err(not_a_record("integer"))
    }

    fn serialize_u64(self, _v: u64) -> Result<Self::Ok> {
        Err(not_a_record("integer"))
    }

    fn serialize_f32(self, _v: f32) -> Result<Self::Ok> {
        Err(not_a_record("number"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Self::Ok> {
        Err(not_a_record("number"))
    }

    fn serialize_char(self, _v: char) -> Result<Self::Ok> {
        Err(not_a_record("char"))
    }

    fn serialize_str(self, _v: &str) -> Result<Self::Ok> {
        Err(not_a_record("string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok> {
        Err(not_a_record("bytes"))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Err(not_a_record("option"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Err(not_a_record("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Self::Ok> {
        Err(not_a_record(name))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok> {
        Err(not_a_record("enum variant"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(not_a_record("enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(not_a_record("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(not_a_record("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(not_a_record("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(not_a_record("enum variant"))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(RowCollector::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        Ok(RowCollector::with_capacity(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(not_a_record("enum variant"))
    }
}

fn not_a_record(found: &str) -> Error {
    Error::unsupported_type(format!(
        "TOON records must be structs or string-keyed maps, found {}",
        found
    ))
}

/// Collects one record's fields in declaration order.
pub struct RowCollector {
    entries: Vec<(String, String)>,
    current_key: Option<String>,
}

impl RowCollector {
    fn with_capacity(len: usize) -> Self {
        RowCollector {
            entries: Vec::with_capacity(len),
            current_key: None,
        }
    }

    fn push_entry(&mut self, name: String, value: String) -> Result<()> {
        // Field names travel unescaped in the header, so commas and braces
        // would corrupt the wire format.
        if name.contains(|c| matches!(c, ',' | '{' | '}' | '\n')) {
            return Err(Error::format(format!(
                "Field name '{}' cannot appear in a TOON header.",
                name
            )));
        }
        self.entries.push((name, value));
        Ok(())
    }
}

impl ser::SerializeStruct for RowCollector {
    type Ok = Vec<(String, String)>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let text = value.serialize(ValueSerializer)?;
        self.push_entry(key.to_string(), text)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(self.entries)
    }
}

impl ser::SerializeMap for RowCollector {
    type Ok = Vec<(String, String)>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(key.serialize(ValueSerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        let text = value.serialize(ValueSerializer)?;
        self.push_entry(key, text)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(self.entries)
    }
}

/// Renders a single scalar field value as text.
///
/// `None` and unit render as the empty string; nested sequences, maps, and
/// structs are unsupported inside a record.
pub struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(if v { "true" } else { "false" }.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<String> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<String> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<String> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<String> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<String> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(not_a_scalar("bytes"))
    }

    fn serialize_none(self) -> Result<String> {
        Ok(String::new())
    }

    fn serialize_some<T>(self, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String> {
        Ok(String::new())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Ok(String::new())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(not_a_scalar("enum variant with data"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(not_a_scalar("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(not_a_scalar("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(not_a_scalar("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(not_a_scalar("enum variant with data"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(not_a_scalar("map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(not_a_scalar("nested struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(not_a_scalar("enum variant with data"))
    }
}

fn not_a_scalar(found: &str) -> Error {
    Error::unsupported_type(format!(
        "TOON field values must be scalars, found {}",
        found
    ))
}
