//! SQLite implementation for dynmodels

mod executor;
mod types;

pub use executor::SqliteExecutor;
