//! Error types for TOON encoding and decoding.
//!
//! All failures surface through a single [`Error`] enum:
//!
//! - **Argument errors**: empty or whitespace-only input where content is required
//! - **Format errors**: structurally invalid TOON text (bad header, row/count mismatches)
//! - **Conversion errors**: a row value that cannot be converted to the target field type
//!
//! Errors are raised synchronously at the point of detection and nothing is
//! recovered internally; a failed parse or decode returns no partial results.
//!
//! ## Examples
//!
//! ```rust
//! use toon_records::{Document, Error};
//!
//! let result = Document::parse("users{Id,Name}:");
//! assert!(matches!(result, Err(Error::Format(_))));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding TOON.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Empty or whitespace-only input where a non-empty value is required
    #[error("{0}")]
    Argument(String),

    /// Structurally invalid TOON text
    #[error("{0}")]
    Format(String),

    /// A value token that cannot be converted to the target scalar type
    #[error("cannot convert '{value}' to {target}")]
    Conversion {
        value: String,
        target: &'static str,
    },

    /// A record or field shape TOON cannot represent (nested data, non-string map keys)
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error originating from a serde implementation
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates an argument error for missing/empty input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_records::Error;
    ///
    /// let err = Error::argument("TOON input is empty.");
    /// assert!(err.to_string().contains("empty"));
    /// ```
    pub fn argument(msg: impl Into<String>) -> Self {
        Error::Argument(msg.into())
    }

    /// Creates a format error for structurally invalid TOON text.
    pub fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }

    /// Creates a conversion error for a token that does not parse as `target`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_records::Error;
    ///
    /// let err = Error::conversion("abc", "integer");
    /// assert!(err.to_string().contains("'abc'"));
    /// ```
    pub fn conversion(value: impl Into<String>, target: &'static str) -> Self {
        Error::Conversion {
            value: value.into(),
            target,
        }
    }

    /// Creates an unsupported type error for shapes TOON cannot carry.
    pub fn unsupported_type(msg: impl Into<String>) -> Self {
        Error::UnsupportedType(msg.into())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
