//! SQLite query executor

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::row::DynRow;
use crate::traits::QueryExecutor;
use async_trait::async_trait;
use rusqlite::Connection;
use tracing::debug;

use super::types::from_sqlite_value;

/// A SQLite-backed [`QueryExecutor`] holding one connection for its lifetime.
pub struct SqliteExecutor {
    location: Location,
    connection: Mutex<Connection>,
}

#[derive(Debug)]
enum Location {
    File(PathBuf),
    InMemory,
}

impl SqliteExecutor {
    /// Open a SQLite database at the specified file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let connection = Connection::open(path)?;
        Ok(Self {
            location: Location::File(path.to_path_buf()),
            connection: Mutex::new(connection),
        })
    }

    /// Open a fresh in-memory database.
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            location: Location::InMemory,
            connection: Mutex::new(Connection::open_in_memory()?),
        })
    }

    /// Run a batch of statements, e.g. to seed tables in tests.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.with_connection(|conn| Ok(conn.execute_batch(sql)?))
    }

    /// The database file, or `None` for an in-memory database.
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path),
            Location::InMemory => None,
        }
    }

    fn with_connection<R>(&self, f: impl FnOnce(&Connection) -> Result<R>) -> Result<R> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| Error::Connection("sqlite connection lock poisoned".to_string()))?;
        f(&conn)
    }
}

fn query_all(conn: &Connection, sql: &str) -> Result<Vec<DynRow>> {
    let mut stmt = conn.prepare(sql)?;
    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let mut rows = stmt.query([])?;
    let mut results = Vec::new();
    while let Some(row) = rows.next()? {
        let mut dyn_row = DynRow::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            dyn_row.push(name.as_str(), from_sqlite_value(row.get_ref(i)?));
        }
        results.push(dyn_row);
    }

    Ok(results)
}

#[async_trait]
impl QueryExecutor for SqliteExecutor {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn fetch_rows(&self, sql: &str) -> Result<Vec<DynRow>> {
        debug!("sqlite ({:?}): {}", self.location, sql);
        self.with_connection(|conn| query_all(conn, sql))
    }
}
