//! MySQL query executor

use crate::error::Result;
use crate::row::DynRow;
use crate::traits::QueryExecutor;
use async_trait::async_trait;
use mysql_async::prelude::*;
use mysql_async::{Pool as MysqlAsyncPool, Row as MySqlAsyncRow};
use tracing::debug;

use super::row::from_mysql_row;

/// A MySQL-backed [`QueryExecutor`].
///
/// Wraps a `mysql_async::Pool` constrained to a single connection: the
/// generator issues one query at a time and keeps the same session for the
/// whole run.
///
/// # Example
///
/// ```ignore
/// use dynmodels::{MySqlExecutor, QueryExecutor};
///
/// let exec = MySqlExecutor::builder("db.internal", "etl", "secret", "analytics")
///     .port(3307)
///     .build();
/// let rows = exec.fetch_rows("SELECT customer, customer_env FROM tenants").await?;
/// exec.disconnect().await?;
/// ```
pub struct MySqlExecutor {
    inner: MysqlAsyncPool,
}

impl MySqlExecutor {
    /// Create a builder from the named connection values.
    pub fn builder(host: &str, user: &str, password: &str, database: &str) -> MySqlExecutorBuilder {
        MySqlExecutorBuilder {
            host: host.to_string(),
            port: None,
            user: user.to_string(),
            password: password.to_string(),
            database: database.to_string(),
        }
    }

    /// Disconnect and drop the underlying pool.
    pub async fn disconnect(self) -> Result<()> {
        self.inner.disconnect().await?;
        Ok(())
    }
}

/// Builder for a [`MySqlExecutor`].
///
/// No connection is opened until the first query.
pub struct MySqlExecutorBuilder {
    host: String,
    port: Option<u16>,
    user: String,
    password: String,
    database: String,
}

impl MySqlExecutorBuilder {
    /// Connect to a non-default TCP port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Build the [`MySqlExecutor`] with the configured options.
    pub fn build(self) -> MySqlExecutor {
        let mut pool_opts = mysql_async::PoolOpts::default();
        if let Some(constraints) = mysql_async::PoolConstraints::new(1, 1) {
            pool_opts = pool_opts.with_constraints(constraints);
        }

        let mut opts = mysql_async::OptsBuilder::default()
            .ip_or_hostname(self.host)
            .user(Some(self.user))
            .pass(Some(self.password))
            .db_name(Some(self.database))
            .pool_opts(pool_opts);
        if let Some(port) = self.port {
            opts = opts.tcp_port(port);
        }

        MySqlExecutor {
            inner: MysqlAsyncPool::new(opts),
        }
    }
}

#[async_trait]
impl QueryExecutor for MySqlExecutor {
    fn backend(&self) -> &'static str {
        "mysql"
    }

    async fn fetch_rows(&self, sql: &str) -> Result<Vec<DynRow>> {
        let mut conn = self.inner.get_conn().await?;
        debug!("mysql: {}", sql);

        let rows: Vec<MySqlAsyncRow> = conn.query(sql).await?;

        rows.into_iter().map(from_mysql_row).collect()
    }
}
