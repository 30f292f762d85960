//! Error types for dynmodels-gen

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for dynmodels-gen operations
pub type Result<T> = std::result::Result<T, GenError>;

/// Everything that can stop a generation run.
///
/// Every variant is fatal: the driver stops at the first one it sees and
/// leaves files written by earlier tasks in place.
#[derive(Error, Debug)]
pub enum GenError {
    #[error("Project root (indicated by a `{marker}` entry) not found above {}", .start.display())]
    ConfigNotFound { start: PathBuf, marker: &'static str },

    #[error("Model config file not found at: {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("Failed to parse model config {}: {reason}", .path.display())]
    ConfigMalformed { path: PathBuf, reason: String },

    #[error("Error executing query `{query}`: {source}")]
    QueryExecutionFailed {
        query: String,
        #[source]
        source: dynmodels::Error,
    },

    #[error("Query `{query}` returned a row without field `{field}`")]
    MissingField { query: String, field: String },

    #[error("Query `{query}` returned an unusable value for `{field}`: {reason}")]
    InvalidField {
        query: String,
        field: String,
        reason: String,
    },

    #[error("Template `{template}` references `{{{key}}}`, which is not bound here")]
    TemplateBinding { template: String, key: String },

    #[error("Template `{template}` is malformed: {reason}")]
    TemplateSyntax { template: String, reason: String },

    #[error("Failed to write {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl GenError {
    /// Whether this error happened while setting up the run (settings,
    /// backend connection) rather than while generating.
    pub fn is_setup(&self) -> bool {
        matches!(self, GenError::ConfigError(_))
    }
}

impl From<config::ConfigError> for GenError {
    fn from(err: config::ConfigError) -> Self {
        GenError::ConfigError(err.to_string())
    }
}
