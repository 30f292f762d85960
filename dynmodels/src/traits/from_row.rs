//! FromRow trait for projecting backend rows into typed records

use crate::error::{Error, Result};
use crate::value::Value;

/// A row that can be queried by column name.
///
/// Implementations decide how names are matched. [`crate::DynRow`] matches
/// exactly first and then ignores ASCII case, so `CUSTOMER` and `customer`
/// both resolve a `customer` field.
pub trait Row {
    /// Get a value from the row by column name as a dynamic Value.
    ///
    /// Returns [`crate::Error::ColumnNotFound`] if the column doesn't exist.
    fn get_value(&self, column: &str) -> Result<Value>;
}

/// Extension trait for typed access to row values.
pub trait RowExt: Row {
    /// Get a typed value from the row by column name.
    ///
    /// Conversion failures are reported as [`Error::ColumnType`] naming the
    /// column.
    fn get<T: crate::FromValue>(&self, column: &str) -> Result<T> {
        let value = self.get_value(column)?;
        T::from_value(value).map_err(|e| match e {
            Error::TypeConversion { expected, actual } => Error::ColumnType {
                column: column.to_string(),
                expected,
                actual,
            },
            other => other,
        })
    }
}

// Implement RowExt for all Row types
impl<R: Row> RowExt for R {}

/// Trait for types that can be constructed from a row.
///
/// This trait is typically implemented via the `#[derive(FromRow)]` macro,
/// which reads each field from the column of the same name.
///
/// # Manual Implementation
///
/// ```ignore
/// use dynmodels::{FromRow, Row, RowExt, Result};
///
/// pub struct Tenant {
///     pub customer: String,
/// }
///
/// impl FromRow for Tenant {
///     fn from_row<R: Row>(row: &R) -> Result<Self> {
///         Ok(Self {
///             customer: row.get("customer")?,
///         })
///     }
///
///     fn column_names() -> &'static [&'static str] {
///         &["customer"]
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Construct an instance of this type from a row.
    fn from_row<R: Row>(row: &R) -> Result<Self>;

    /// Get the column names that this type reads from.
    fn column_names() -> &'static [&'static str];
}
