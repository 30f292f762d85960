//! Structures parsed from `dynamic_models.yml`

use serde::{Deserialize, Serialize};

/// Top-level shape of the model config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicModelsFile {
    pub dynamic_models: Vec<ModelSpec>,
}

/// One dynamic model family: two metadata queries and three templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// File name stem template (`{customer}`, `{model}`)
    pub name: String,

    /// Output directory template, relative to the project root
    /// (`{customer}`, `{customer_env}`)
    pub location: String,

    /// File content template (`{customer}`, `{model}`)
    pub sql: String,

    /// Customer query first, model query second
    pub params: [QueryParam; 2],
}

/// A metadata query descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    pub query: String,
}

impl ModelSpec {
    /// Query enumerating `customer` / `customer_env` rows
    pub fn customer_query(&self) -> &str {
        &self.params[0].query
    }

    /// Query enumerating `table_name` rows
    pub fn model_query(&self) -> &str {
        &self.params[1].query
    }
}
