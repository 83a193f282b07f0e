//! Storage-driver binding: the value/scan contract.
//!
//! A generic SQL-style driver exchanges column values as a small set of
//! kinds, modelled by [`SqlValue`]. Civil types write themselves as their
//! canonical text (or `NULL` when invalid) through [`Valuer`], and read
//! back from `NULL`, bytes or text through [`Scanner`]. Any other kind is a
//! [`CivilError::ConversionType`].

use chrono::{DateTime, Utc};

use crate::error::{CivilError, Result};
use crate::parse;

/// A column value as handed over by a storage driver.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    /// Name of the value's kind, used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Int(_) => "i64",
            SqlValue::Float(_) => "f64",
            SqlValue::Bool(_) => "bool",
            SqlValue::Bytes(_) => "bytes",
            SqlValue::Text(_) => "string",
            SqlValue::Timestamp(_) => "timestamp",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Bytes(v)
    }
}

impl From<&[u8]> for SqlValue {
    fn from(v: &[u8]) -> Self {
        SqlValue::Bytes(v.to_vec())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// Produces the value written to storage.
pub trait Valuer {
    fn value(&self) -> SqlValue;
}

/// Overwrites `self` from a value read from storage.
pub trait Scanner {
    /// # Errors
    ///
    /// [`CivilError::ConversionType`] for unsupported kinds, or the parse
    /// error of the text. A failed scan leaves `self` unchanged.
    fn scan(&mut self, src: &SqlValue) -> Result<()>;
}

/// Extract the text carried by `src`.
///
/// `Ok(None)` means `NULL`. Bytes must be UTF-8.
pub(crate) fn scan_text<'a>(
    src: &'a SqlValue,
    target: &'static str,
    layout: &'static str,
) -> Result<Option<&'a str>> {
    match src {
        SqlValue::Null => Ok(None),
        SqlValue::Bytes(b) => parse::utf8(b, layout).map(Some),
        SqlValue::Text(s) => Ok(Some(s)),
        other => Err(CivilError::ConversionType {
            found: other.kind(),
            target,
        }),
    }
}
