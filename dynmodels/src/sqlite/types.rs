//! Type conversion utilities for SQLite

use crate::value::Value;
use rusqlite::types::ValueRef;

/// Convert a borrowed SQLite value to a dynmodels Value.
pub(crate) fn from_sqlite_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::I64(v),
        ValueRef::Real(v) => Value::F64(v),
        ValueRef::Text(v) => match std::str::from_utf8(v) {
            Ok(s) => Value::String(s.to_string()),
            Err(_) => Value::Bytes(v.to_vec()),
        },
        ValueRef::Blob(v) => Value::Bytes(v.to_vec()),
    }
}
