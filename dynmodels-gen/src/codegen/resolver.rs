//! Fetch the customers and models of one model spec

use dynmodels::{FromRow, QueryExecutor};
use tracing::{debug, info};

use crate::error::{GenError, Result};
use crate::model_config::ModelSpec;

use super::task::GenerationTask;

/// One row of the customer query
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CustomerRecord {
    pub customer: String,
    pub customer_env: String,
}

/// One row of the model query
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ModelRecord {
    pub table_name: String,
}

/// Customers and models of a spec, in the order the backend returned them.
///
/// Duplicates are kept: a duplicated row yields a duplicated task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    pub customers: Vec<CustomerRecord>,
    pub models: Vec<ModelRecord>,
}

impl Resolved {
    /// Number of tasks the cross product yields
    pub fn task_count(&self) -> usize {
        self.customers.len() * self.models.len()
    }

    /// Cross product, customer-major: `(c0, m0), (c0, m1), ..., (c1, m0), ...`
    pub fn tasks<'a>(
        &'a self,
        spec: &'a ModelSpec,
    ) -> impl Iterator<Item = GenerationTask<'a>> + 'a {
        self.customers.iter().flat_map(move |customer| {
            self.models.iter().map(move |model| GenerationTask {
                spec,
                customer,
                model,
            })
        })
    }
}

/// Runs a spec's two metadata queries through a [`QueryExecutor`].
pub struct EntityResolver<'e, E: ?Sized> {
    executor: &'e E,
}

impl<'e, E: QueryExecutor + ?Sized> EntityResolver<'e, E> {
    pub fn new(executor: &'e E) -> Self {
        Self { executor }
    }

    /// Execute the customer query, then the model query, once each.
    pub async fn resolve(&self, spec: &ModelSpec) -> Result<Resolved> {
        let customers: Vec<CustomerRecord> = self.fetch(spec.customer_query()).await?;
        for c in &customers {
            info!("Customer: {}, Env: {}", c.customer, c.customer_env);
        }

        let models: Vec<ModelRecord> = self.fetch(spec.model_query()).await?;
        debug!(
            "Resolved {} customer(s) x {} model(s)",
            customers.len(),
            models.len()
        );

        Ok(Resolved { customers, models })
    }

    async fn fetch<T: FromRow>(&self, query: &str) -> Result<Vec<T>> {
        let rows = self
            .executor
            .fetch_rows(query)
            .await
            .map_err(|source| GenError::QueryExecutionFailed {
                query: query.to_string(),
                source,
            })?;

        rows.iter()
            .map(|row| T::from_row(row).map_err(|e| projection_error(query, e)))
            .collect()
    }
}

fn projection_error(query: &str, err: dynmodels::Error) -> GenError {
    match err {
        dynmodels::Error::ColumnNotFound(field) => GenError::MissingField {
            query: query.to_string(),
            field,
        },
        dynmodels::Error::ColumnType {
            column,
            expected,
            actual,
        } => GenError::InvalidField {
            query: query.to_string(),
            field: column,
            reason: format!("expected {expected}, got {actual}"),
        },
        other => GenError::InvalidField {
            query: query.to_string(),
            field: String::new(),
            reason: other.to_string(),
        },
    }
}
