//! Bound values.
//!
//! [`Value`] is the only data that crosses the compiler boundary: every
//! parameter placed into a statement is a `Value`, and a driver hands rows back
//! as `Value`s. The compiler never coerces one tag into another.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// A dialect-neutral SQL scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// Double precision float.
    Double(f64),
    /// Text value.
    String(String),
    /// Timestamp in UTC.
    Date(DateTime<Utc>),
    /// Binary blob value.
    Bytes(Vec<u8>),
    /// UUID value.
    Uuid(Uuid),
    /// JSON document.
    Json(serde_json::Value),
}

impl Value {
    /// Returns the name of the active tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::Bytes(_) => "bytes",
            Self::Uuid(_) => "uuid",
            Self::Json(_) => "json",
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToValue {
    /// Converts the value to a [`Value`].
    fn to_value(self) -> Value;
}

impl ToValue for Value {
    fn to_value(self) -> Value {
        self
    }
}

impl ToValue for bool {
    fn to_value(self) -> Value {
        Value::Bool(self)
    }
}

impl ToValue for i64 {
    fn to_value(self) -> Value {
        Value::Int(self)
    }
}

macro_rules! widen_int {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(self) -> Value {
                    Value::Int(i64::from(self))
                }
            }
        )*
    };
}

widen_int!(i32, i16, i8, u32, u16, u8);

impl ToValue for f64 {
    fn to_value(self) -> Value {
        Value::Double(self)
    }
}

impl ToValue for f32 {
    fn to_value(self) -> Value {
        Value::Double(f64::from(self))
    }
}

impl ToValue for String {
    fn to_value(self) -> Value {
        Value::String(self)
    }
}

impl ToValue for &str {
    fn to_value(self) -> Value {
        Value::String(String::from(self))
    }
}

impl ToValue for &String {
    fn to_value(self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for Vec<u8> {
    fn to_value(self) -> Value {
        Value::Bytes(self)
    }
}

impl ToValue for &[u8] {
    fn to_value(self) -> Value {
        Value::Bytes(self.to_vec())
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(self) -> Value {
        Value::Date(self)
    }
}

impl ToValue for NaiveDate {
    fn to_value(self) -> Value {
        Value::Date(self.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl ToValue for Uuid {
    fn to_value(self) -> Value {
        Value::Uuid(self)
    }
}

impl ToValue for serde_json::Value {
    fn to_value(self) -> Value {
        Value::Json(self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

macro_rules! from_to_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    v.to_value()
                }
            }
        )*
    };
}

from_to_value!(
    bool,
    i64,
    i32,
    i16,
    i8,
    u32,
    u16,
    u8,
    f64,
    f32,
    String,
    &str,
    Vec<u8>,
    DateTime<Utc>,
    NaiveDate,
    Uuid,
    serde_json::Value
);

impl<T: ToValue> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.to_value()
    }
}
