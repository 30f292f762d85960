//! dynmodels - backend-agnostic metadata queries
//!
//! The generator in `dynmodels-gen` only ever needs one thing from a database:
//! run a read-only query and hand back the rows. This crate defines that
//! capability ([`QueryExecutor`]), a backend-neutral row ([`DynRow`]), and the
//! projection traits used to turn rows into typed records.
//!
//! # Backends
//!
//! - [`MySqlExecutor`] built on `mysql_async`
//! - [`SqliteExecutor`] built on `rusqlite`
//!
//! # Example
//!
//! ```ignore
//! use dynmodels::{FromRow, QueryExecutor, SqliteExecutor};
//!
//! #[derive(FromRow)]
//! pub struct Tenant {
//!     pub customer: String,
//! }
//!
//! async fn tenants(exec: &dyn QueryExecutor) -> dynmodels::Result<Vec<Tenant>> {
//!     exec.fetch_rows("SELECT customer FROM tenants")
//!         .await?
//!         .iter()
//!         .map(Tenant::from_row)
//!         .collect()
//! }
//! ```

pub mod error;
pub mod mysql;
pub mod row;
pub mod sqlite;
pub mod traits;
pub mod value;

// Re-export the derive macro
pub use dynmodels_derive::FromRow;

// Re-export main types
pub use error::{Error, Result};
pub use mysql::{MySqlExecutor, MySqlExecutorBuilder};
pub use row::DynRow;
pub use sqlite::SqliteExecutor;
pub use traits::{FromRow, FromValue, QueryExecutor, Row, RowExt};
pub use value::Value;
