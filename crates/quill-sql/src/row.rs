//! Row decoding.
//!
//! Executing statements is left to the caller's driver. A driver that hands
//! back rows as [`Value`]s can implement [`Row`] and decode columns into Rust
//! types through [`FromValue`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::value::Value;

/// Converts a [`Value`] into a concrete Rust type.
pub trait FromValue: Sized {
    /// Attempts the conversion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] when the value has another tag, or
    /// [`Error::OutOfRange`] when an integer does not fit.
    fn from_value(value: &Value) -> Result<Self>;
}

const fn mismatch(expected: &'static str, found: &Value) -> Error {
    Error::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

macro_rules! from_value {
    (copy $ty:ty, $kind:literal, $variant:ident) => {
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Result<Self> {
                match value {
                    Value::$variant(v) => Ok(*v),
                    other => Err(mismatch($kind, other)),
                }
            }
        }
    };
    ($ty:ty, $kind:literal, $variant:ident) => {
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Result<Self> {
                match value {
                    Value::$variant(v) => Ok(v.clone()),
                    other => Err(mismatch($kind, other)),
                }
            }
        }
    };
}

from_value!(copy bool, "bool", Bool);
from_value!(copy i64, "int", Int);
from_value!(copy f64, "double", Double);
from_value!(copy DateTime<Utc>, "date", Date);
from_value!(copy Uuid, "uuid", Uuid);
from_value!(String, "string", String);
from_value!(Vec<u8>, "bytes", Bytes);
from_value!(serde_json::Value, "json", Json);

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Int(v) => Self::try_from(*v).map_err(|_| Error::OutOfRange {
                kind: "i32",
                value: *v,
            }),
            other => Err(mismatch("int", other)),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// A result row addressed by column name.
pub trait Row {
    /// Returns the raw value of a column, if present.
    fn column(&self, name: &str) -> Option<&Value>;

    /// Decodes a column into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] if the row has no such column, or the
    /// conversion error from [`FromValue`].
    fn decode<T: FromValue>(&self, name: &str) -> Result<T> {
        let value = self
            .column(name)
            .ok_or_else(|| Error::MissingColumn(String::from(name)))?;
        T::from_value(value)
    }
}

impl Row for BTreeMap<String, Value> {
    fn column(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Row for Vec<(String, Value)> {
    fn column(&self, name: &str) -> Option<&Value> {
        self.iter().find(|(c, _)| c == name).map(|(_, v)| v)
    }
}
