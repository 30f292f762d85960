//! Test doubles shared by the codegen unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use dynmodels::{DynRow, QueryExecutor};

use crate::model_config::{ModelSpec, QueryParam};

/// Answers queries from a fixed table and records every call.
#[derive(Default)]
pub(crate) struct StubExecutor {
    responses: HashMap<String, Vec<DynRow>>,
    calls: Mutex<Vec<String>>,
}

impl StubExecutor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, query: &str, rows: Vec<DynRow>) -> Self {
        self.responses.insert(query.to_string(), rows);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for StubExecutor {
    fn backend(&self) -> &'static str {
        "stub"
    }

    async fn fetch_rows(&self, sql: &str) -> dynmodels::Result<Vec<DynRow>> {
        self.calls.lock().unwrap().push(sql.to_string());
        self.responses
            .get(sql)
            .cloned()
            .ok_or_else(|| dynmodels::Error::Query(format!("no stubbed response for {sql}")))
    }
}

pub(crate) fn spec(customer_query: &str, model_query: &str) -> ModelSpec {
    ModelSpec {
        name: "cdm_{customer}_{model}".to_string(),
        location: "models/customers/{customer}/{customer_env}".to_string(),
        sql: "select * from {model} where tenant='{customer}'".to_string(),
        params: [
            QueryParam {
                query: customer_query.to_string(),
            },
            QueryParam {
                query: model_query.to_string(),
            },
        ],
    }
}

pub(crate) fn spec_with_templates(name: &str, location: &str, sql: &str) -> ModelSpec {
    ModelSpec {
        name: name.to_string(),
        location: location.to_string(),
        sql: sql.to_string(),
        ..spec("customers", "models")
    }
}
