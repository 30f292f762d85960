//! Connection setup: pick the adapter named by [`BackendSettings`]

use async_trait::async_trait;
use dynmodels::{DynRow, MySqlExecutor, QueryExecutor, SqliteExecutor};
use tracing::info;

use crate::config::{BackendKind, BackendSettings};
use crate::error::{GenError, Result};

/// The connected backend. Acquired once at startup, closed once at the end.
pub enum Backend {
    MySql(MySqlExecutor),
    Sqlite(SqliteExecutor),
}

/// Validate `settings` and open the backend they describe.
pub fn connect(settings: &BackendSettings) -> Result<Backend> {
    settings.validate()?;

    let setup_err = |e: dynmodels::Error| {
        GenError::ConfigError(format!("failed to set up {} backend: {}", settings.kind, e))
    };

    match settings.kind {
        BackendKind::Mysql => {
            // validate() guarantees these are present
            let field = |v: &Option<String>| v.clone().unwrap_or_default();
            let executor = MySqlExecutor::builder(
                &field(&settings.host),
                &field(&settings.username),
                &field(&settings.password),
                &field(&settings.database),
            )
            .port(settings.port_or_default())
            .build();
            info!(
                "Connected to MySQL at {}:{}",
                field(&settings.host),
                settings.port_or_default()
            );
            Ok(Backend::MySql(executor))
        }
        BackendKind::Sqlite => {
            let path = settings.path.clone().unwrap_or_default();
            let executor = SqliteExecutor::open(&path).map_err(setup_err)?;
            info!("Opened SQLite database {:?}", path);
            Ok(Backend::Sqlite(executor))
        }
    }
}

impl Backend {
    /// Release the connection.
    pub async fn close(self) -> Result<()> {
        match self {
            Backend::MySql(executor) => executor
                .disconnect()
                .await
                .map_err(|e| GenError::ConfigError(format!("failed to disconnect: {}", e))),
            Backend::Sqlite(_) => Ok(()),
        }
    }
}

#[async_trait]
impl QueryExecutor for Backend {
    fn backend(&self) -> &'static str {
        match self {
            Backend::MySql(executor) => executor.backend(),
            Backend::Sqlite(executor) => executor.backend(),
        }
    }

    async fn fetch_rows(&self, sql: &str) -> dynmodels::Result<Vec<DynRow>> {
        match self {
            Backend::MySql(executor) => executor.fetch_rows(sql).await,
            Backend::Sqlite(executor) => executor.fetch_rows(sql).await,
        }
    }
}
