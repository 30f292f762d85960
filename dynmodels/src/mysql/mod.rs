//! MySQL implementation for dynmodels

mod executor;
mod row;
mod types;

pub use executor::{MySqlExecutor, MySqlExecutorBuilder};
