//! Error types for dynmodels

use thiserror::Error;

/// Result type alias for dynmodels operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by a backend adapter or while reading a row
#[derive(Error, Debug)]
pub enum Error {
    /// MySQL driver error
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// SQLite driver error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Type conversion error
    #[error("Type conversion error: expected {expected}, got {actual}")]
    TypeConversion {
        expected: &'static str,
        actual: String,
    },

    /// A column exists but its value does not convert to the requested type
    #[error("Column `{column}` has type {actual}, expected {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
        actual: String,
    },

    /// Column not found in row
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),
}
