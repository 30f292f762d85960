//! FromValue trait for converting column values to Rust types

use crate::error::{Error, Result};
use crate::value::Value;

/// Trait for types that can be constructed from a column value.
pub trait FromValue: Sized {
    /// Convert a column value to this type.
    fn from_value(value: Value) -> Result<Self>;
}

/// Text, or an integer rendered in decimal. Integer identifiers (a numeric
/// tenant id, say) are as usable in a path as text ones.
impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            Value::I64(v) => Ok(v.to_string()),
            Value::Bytes(v) => String::from_utf8(v).map_err(|e| Error::TypeConversion {
                expected: "utf8 string",
                actual: format!("invalid utf8: {}", e),
            }),
            _ => Err(Error::TypeConversion {
                expected: "text or integer",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

// Implement for Option<T>
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            _ => Ok(Some(T::from_value(value)?)),
        }
    }
}
