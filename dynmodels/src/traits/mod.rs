//! Core traits for dynmodels

mod executor;
mod from_row;
mod from_value;

pub use executor::QueryExecutor;
pub use from_row::{FromRow, Row, RowExt};
pub use from_value::FromValue;
