//! QueryExecutor trait: the one capability the generator needs from a backend

use crate::error::Result;
use crate::row::DynRow;
use async_trait::async_trait;

/// A read-only query capability.
///
/// This trait abstracts over different database backends. Callers only rely
/// on "run this SQL, get every row back in backend order"; nothing about
/// dialect, column-name casing, or transactions leaks through it.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Short backend name used in log lines (`mysql`, `sqlite`, ...).
    fn backend(&self) -> &'static str;

    /// Run `sql` and return all rows in the order the backend produced them.
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<DynRow>>;
}

#[async_trait]
impl<E: QueryExecutor + ?Sized> QueryExecutor for Box<E> {
    fn backend(&self) -> &'static str {
        (**self).backend()
    }

    async fn fetch_rows(&self, sql: &str) -> Result<Vec<DynRow>> {
        (**self).fetch_rows(sql).await
    }
}

#[async_trait]
impl<E: QueryExecutor + ?Sized> QueryExecutor for &E {
    fn backend(&self) -> &'static str {
        (**self).backend()
    }

    async fn fetch_rows(&self, sql: &str) -> Result<Vec<DynRow>> {
        (**self).fetch_rows(sql).await
    }
}
