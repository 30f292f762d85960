//! Generation driver: load config, then resolve, render and write every task

use std::path::PathBuf;

use dynmodels::QueryExecutor;
use tracing::{debug, error, info};

use super::materializer::FileMaterializer;
use super::resolver::EntityResolver;
use crate::error::Result;
use crate::model_config::{self, LoadedConfig};

/// Where the driver gets its model specs from
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Walk upward from this directory to find the project root
    Search(PathBuf),
    /// Use this directory as the project root
    Root(PathBuf),
    /// Specs that were already loaded
    Loaded(LoadedConfig),
}

impl ConfigSource {
    fn load(&self) -> Result<LoadedConfig> {
        match self {
            ConfigSource::Search(start) => model_config::load(start),
            ConfigSource::Root(root) => model_config::load_from(root),
            ConfigSource::Loaded(config) => Ok(config.clone()),
        }
    }
}

/// Progress of a run.
///
/// `Done` and `Failed` are terminal. `Failed` keeps the message of the first
/// error; the error itself is returned from [`Generator::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    ConfigLoaded,
    /// Resolving the spec at this index
    PerSpec(usize),
    /// Rendering and writing task `.1` of spec `.0`
    PerTask(usize, usize),
    Done,
    Failed(String),
}

/// Summary of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub specs_processed: usize,
    /// Written paths in write order (planned paths in dry-run mode)
    pub files: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Sequential, fail-fast generation over one executor.
///
/// # Example
///
/// ```ignore
/// let mut generator = Generator::new(&executor, ConfigSource::Search(std::env::current_dir()?));
/// let report = generator.run().await?;
/// println!("{} files", report.files.len());
/// ```
pub struct Generator<'e, E: ?Sized> {
    executor: &'e E,
    source: ConfigSource,
    dry_run: bool,
    state: DriverState,
}

impl<'e, E: QueryExecutor + ?Sized> Generator<'e, E> {
    pub fn new(executor: &'e E, source: ConfigSource) -> Self {
        Self {
            executor,
            source,
            dry_run: false,
            state: DriverState::Idle,
        }
    }

    /// Resolve and render everything but write nothing
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn state(&self) -> &DriverState {
        &self.state
    }

    /// Run to `Done`, or stop at the first error and move to `Failed`.
    ///
    /// Files written before the failure are left in place.
    pub async fn run(&mut self) -> Result<GenerationReport> {
        self.transition(DriverState::Idle);
        match self.run_specs().await {
            Ok(report) => {
                self.transition(DriverState::Done);
                info!(
                    "Generated {} file(s) from {} dynamic model(s)",
                    report.files.len(),
                    report.specs_processed
                );
                Ok(report)
            }
            Err(e) => {
                match self.state {
                    DriverState::PerSpec(i) | DriverState::PerTask(i, _) => {
                        error!("Dynamic model #{} failed: {}", i, e)
                    }
                    _ => error!("Generation failed: {}", e),
                }
                self.transition(DriverState::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    async fn run_specs(&mut self) -> Result<GenerationReport> {
        let config = self.source.load()?;
        self.transition(DriverState::ConfigLoaded);

        let materializer = FileMaterializer::new().dry_run(self.dry_run);
        let mut report = GenerationReport {
            dry_run: self.dry_run,
            ..Default::default()
        };

        for (i, spec) in config.specs.iter().enumerate() {
            self.transition(DriverState::PerSpec(i));
            debug!("Dynamic model #{}: {}", i, spec.name);

            let resolved = EntityResolver::new(self.executor).resolve(spec).await?;
            report.files.reserve(resolved.task_count());

            for (j, task) in resolved.tasks(spec).enumerate() {
                self.transition(DriverState::PerTask(i, j));
                let artifact = task.render(&config.project_root)?;
                materializer.write_artifact(&artifact)?;
                report.files.push(artifact.path);
            }

            report.specs_processed += 1;
        }

        Ok(report)
    }

    fn transition(&mut self, next: DriverState) {
        debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::testing::{spec, spec_with_templates, StubExecutor};
    use crate::error::GenError;
    use crate::model_config::ModelSpec;
    use dynmodels::DynRow;
    use std::fs;
    use std::path::Path;

    fn customer(name: &str, env: &str) -> DynRow {
        DynRow::new().with("customer", name).with("customer_env", env)
    }

    fn model(name: &str) -> DynRow {
        DynRow::new().with("table_name", name)
    }

    fn loaded(root: &Path, specs: Vec<ModelSpec>) -> ConfigSource {
        ConfigSource::Loaded(LoadedConfig {
            project_root: root.to_path_buf(),
            specs,
        })
    }

    fn acme_stub() -> StubExecutor {
        StubExecutor::new()
            .respond("customers", vec![customer("acme", "prod")])
            .respond("models", vec![model("orders"), model("invoices")])
    }

    #[tokio::test]
    async fn test_scenario_two_files() {
        let dir = tempfile::tempdir().unwrap();
        let exec = acme_stub();
        let mut generator = Generator::new(&exec, loaded(dir.path(), vec![spec("customers", "models")]));

        let report = generator.run().await.unwrap();

        let base = dir.path().join("models/customers/acme/prod");
        assert_eq!(
            report.files,
            vec![base.join("cdm_acme_orders.sql"), base.join("cdm_acme_invoices.sql")]
        );
        assert_eq!(
            fs::read_to_string(base.join("cdm_acme_orders.sql")).unwrap(),
            "select * from orders where tenant='acme'"
        );
        assert_eq!(
            fs::read_to_string(base.join("cdm_acme_invoices.sql")).unwrap(),
            "select * from invoices where tenant='acme'"
        );
        assert_eq!(report.specs_processed, 1);
        assert_eq!(generator.state(), &DriverState::Done);
    }

    #[tokio::test]
    async fn test_cross_product_size() {
        let dir = tempfile::tempdir().unwrap();
        let exec = StubExecutor::new()
            .respond(
                "customers",
                vec![customer("a", "prod"), customer("b", "dev"), customer("c", "prod")],
            )
            .respond("models", vec![model("m1"), model("m2")]);
        let mut generator = Generator::new(&exec, loaded(dir.path(), vec![spec("customers", "models")]));

        let report = generator.run().await.unwrap();
        assert_eq!(report.files.len(), 6);
    }

    #[tokio::test]
    async fn test_rerun_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let exec = acme_stub();
        let source = loaded(dir.path(), vec![spec("customers", "models")]);

        let first = Generator::new(&exec, source.clone()).run().await.unwrap();
        let before: Vec<Vec<u8>> = first.files.iter().map(|p| fs::read(p).unwrap()).collect();
        let second = Generator::new(&exec, source).run().await.unwrap();
        let after: Vec<Vec<u8>> = second.files.iter().map(|p| fs::read(p).unwrap()).collect();

        assert_eq!(first.files, second.files);
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_missing_field_aborts_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        let exec = StubExecutor::new()
            .respond("customers", vec![DynRow::new().with("customer", "acme")])
            .respond("models", vec![model("orders")])
            .respond("customers2", vec![customer("acme", "prod")]);
        let specs = vec![spec("customers", "models"), spec("customers2", "models")];
        let mut generator = Generator::new(&exec, loaded(dir.path(), specs));

        let err = generator.run().await.unwrap_err();

        assert!(matches!(err, GenError::MissingField { .. }));
        assert!(matches!(generator.state(), DriverState::Failed(_)));
        assert!(!dir.path().join("models").exists());
        // Later specs are never resolved
        assert_eq!(exec.calls(), vec!["customers"]);
    }

    #[tokio::test]
    async fn test_failure_keeps_earlier_files() {
        let dir = tempfile::tempdir().unwrap();
        let exec = acme_stub();
        let specs = vec![spec("customers", "models"), spec("broken", "models")];
        let mut generator = Generator::new(&exec, loaded(dir.path(), specs));

        let err = generator.run().await.unwrap_err();

        assert!(matches!(err, GenError::QueryExecutionFailed { .. }));
        assert!(dir
            .path()
            .join("models/customers/acme/prod/cdm_acme_orders.sql")
            .exists());
    }

    #[tokio::test]
    async fn test_template_error_fails_in_task_state() {
        let dir = tempfile::tempdir().unwrap();
        let exec = acme_stub();
        let bad = spec_with_templates("{model}", "out/{model}", "select 1");
        let mut generator = Generator::new(&exec, loaded(dir.path(), vec![bad]));

        let err = generator.run().await.unwrap_err();

        assert!(matches!(err, GenError::TemplateBinding { ref key, .. } if key == "model"));
        assert!(!dir.path().join("out").exists());
    }

    #[tokio::test]
    async fn test_name_without_model_collapses() {
        let dir = tempfile::tempdir().unwrap();
        let exec = acme_stub();
        let collapsing = spec_with_templates("cdm_{customer}", "out", "select * from {model}");
        let mut generator = Generator::new(&exec, loaded(dir.path(), vec![collapsing]));

        let report = generator.run().await.unwrap();

        assert_eq!(report.files.len(), 2);
        assert_eq!(report.files[0], report.files[1]);
        // Last write wins
        assert_eq!(
            fs::read_to_string(dir.path().join("out/cdm_acme.sql")).unwrap(),
            "select * from invoices"
        );
    }

    #[tokio::test]
    async fn test_dry_run_plans_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let exec = acme_stub();
        let mut generator =
            Generator::new(&exec, loaded(dir.path(), vec![spec("customers", "models")])).dry_run(true);

        let report = generator.run().await.unwrap();

        assert!(report.dry_run);
        assert_eq!(report.files.len(), 2);
        assert!(!dir.path().join("models").exists());
    }

    #[tokio::test]
    async fn test_config_failure_runs_no_queries() {
        let dir = tempfile::tempdir().unwrap();
        let exec = acme_stub();
        let mut generator = Generator::new(&exec, ConfigSource::Root(dir.path().to_path_buf()));

        let err = generator.run().await.unwrap_err();

        assert!(matches!(err, GenError::ConfigMissing(_)));
        assert!(exec.calls().is_empty());
        assert!(matches!(generator.state(), DriverState::Failed(_)));
    }

    #[tokio::test]
    async fn test_no_specs_is_done() {
        let dir = tempfile::tempdir().unwrap();
        let exec = StubExecutor::new();
        let mut generator = Generator::new(&exec, loaded(dir.path(), vec![]));

        let report = generator.run().await.unwrap();
        assert_eq!(report, GenerationReport::default());
        assert_eq!(generator.state(), &DriverState::Done);
    }
}
