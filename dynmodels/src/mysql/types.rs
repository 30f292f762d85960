//! Type conversion utilities for MySQL

use crate::error::{Error, Result};
use crate::value::Value;
use mysql_async::Value as MySqlValue;

/// Convert a text-protocol mysql_async Value to a dynmodels Value.
///
/// `conn.query` uses the text protocol, where every non-NULL cell arrives as
/// `Bytes`. Those become `String` when they are valid UTF-8.
pub(crate) fn from_mysql_value(value: MySqlValue) -> Result<Value> {
    match value {
        MySqlValue::NULL => Ok(Value::Null),
        MySqlValue::Bytes(v) => Ok(String::from_utf8(v)
            .map(Value::String)
            .unwrap_or_else(|e| Value::Bytes(e.into_bytes()))),
        other => Err(Error::TypeConversion {
            expected: "text-protocol value",
            actual: format!("{:?}", other),
        }),
    }
}
