//! dynmodels-gen: render per-tenant SQL model files from metadata queries
//!
//! A project keeps its dynamic model families in `models/dynamic_models.yml`
//! (found by walking up to the directory that contains `.git`):
//!
//! ```yaml
//! dynamic_models:
//!   - name: "cdm_{customer}_{model}"
//!     location: "models/customers/{customer}/{customer_env}"
//!     sql: "select * from {model} where tenant='{customer}'"
//!     params:
//!       - query: "select customer, customer_env from tenants"
//!       - query: "select table_name from cdm_tables"
//! ```
//!
//! For each entry the first query enumerates customers, the second enumerates
//! models, and one file is written per (customer, model) pair at
//! `<root>/<location>/<name>.sql`.
//!
//! # Library Usage
//!
//! ```rust,ignore
//! use dynmodels::SqliteExecutor;
//! use dynmodels_gen::{ConfigSource, Generator};
//!
//! let executor = SqliteExecutor::open("meta.db")?;
//! let report = Generator::new(&executor, ConfigSource::Search(std::env::current_dir()?))
//!     .run()
//!     .await?;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! DYNMODELS_BACKEND__KIND=sqlite DYNMODELS_BACKEND__PATH=meta.db dynmodels-gen generate
//! ```

pub mod backend;
pub mod codegen;
pub mod config;
pub mod error;
pub mod model_config;

use dynmodels::QueryExecutor;
use tracing::info;

pub use backend::{connect, Backend};
pub use codegen::{
    ConfigSource, CustomerRecord, DriverState, GenerationReport, GenerationTask, Generator,
    ModelRecord, OutputArtifact, TemplateContext,
};
pub use config::{BackendKind, BackendSettings, GenConfig};
pub use error::{GenError, Result};
pub use model_config::{LoadedConfig, ModelSpec, QueryParam};

/// Process exit statuses used by the CLI
pub mod exit {
    /// Every file was generated
    pub const SUCCESS: u8 = 0;
    /// The run started but stopped at an error
    pub const RUN_FAILED: u8 = 1;
    /// Settings or backend setup failed before the run started
    pub const SETUP_FAILED: u8 = 2;
}

/// Map a run outcome to a process exit status.
///
/// A failed run never exits 0, so schedulers and CI notice it.
pub fn exit_status<T>(result: &Result<T>) -> u8 {
    match result {
        Ok(_) => exit::SUCCESS,
        Err(e) if e.is_setup() => exit::SETUP_FAILED,
        Err(_) => exit::RUN_FAILED,
    }
}

/// Main entry point for generation against an already connected executor
pub async fn generate<E>(executor: &E, source: ConfigSource, dry_run: bool) -> Result<GenerationReport>
where
    E: QueryExecutor + ?Sized,
{
    info!("Generating with {} backend", executor.backend());
    Generator::new(executor, source).dry_run(dry_run).run().await
}

/// Connect using `config.backend`, generate, and close the connection.
///
/// The connection is closed even when generation fails; the generation
/// error takes precedence over a close error.
pub async fn generate_with_config(config: &GenConfig, source: ConfigSource) -> Result<GenerationReport> {
    let backend = connect(&config.backend)?;
    let result = generate(&backend, source, config.dry_run).await;
    let closed = backend.close().await;
    let report = result?;
    closed?;
    Ok(report)
}
