//! End-to-end tests: real project layout, real SQLite metadata database.
//!
//! Each test builds a throwaway project (`.git` marker plus
//! `models/dynamic_models.yml`) in a temp dir, seeds a SQLite file with
//! tenant and model metadata, and runs the generator through the same entry
//! point the CLI uses.

use std::fs;
use std::path::{Path, PathBuf};

use dynmodels::SqliteExecutor;
use dynmodels_gen::{
    exit, exit_status, generate_with_config, BackendKind, BackendSettings, ConfigSource, GenConfig,
    GenError,
};
use tempfile::TempDir;

const SEED: &str = "
    CREATE TABLE tenants (customer TEXT, customer_env TEXT, active INTEGER);
    INSERT INTO tenants VALUES ('acme', 'prod', 1);
    INSERT INTO tenants VALUES ('globex', 'dev', 1);
    INSERT INTO tenants VALUES ('initech', 'prod', 0);

    CREATE TABLE cdm_tables (table_name TEXT, position INTEGER);
    INSERT INTO cdm_tables VALUES ('orders', 1);
    INSERT INTO cdm_tables VALUES ('invoices', 2);
";

const SCENARIO: &str = r#"
dynamic_models:
  - name: "cdm_{customer}_{model}"
    location: "models/customers/{customer}/{customer_env}"
    sql: "select * from {model} where tenant='{customer}'"
    params:
      - query: "select customer, customer_env from tenants where customer = 'acme'"
      - query: "select table_name from cdm_tables order by position"
"#;

struct Project {
    dir: TempDir,
    config: GenConfig,
}

impl Project {
    fn new(model_config: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::create_dir_all(dir.path().join("models")).unwrap();
        fs::write(dir.path().join("models/dynamic_models.yml"), model_config).unwrap();

        let db = dir.path().join("meta.db");
        SqliteExecutor::open(&db).unwrap().execute_batch(SEED).unwrap();

        let config = GenConfig {
            backend: BackendSettings {
                kind: BackendKind::Sqlite,
                path: Some(db),
                ..Default::default()
            },
            ..Default::default()
        };

        Self { dir, config }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Start the root search from a nested directory, as a script would.
    fn search_source(&self) -> ConfigSource {
        let nested = self.root().join("scripts/generators");
        fs::create_dir_all(&nested).unwrap();
        ConfigSource::Search(nested)
    }

    fn sql_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        collect_sql(&self.root().join("models"), &mut files);
        files.sort();
        files
    }
}

fn collect_sql(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_sql(&path, out);
        } else if path.extension().is_some_and(|e| e == "sql") {
            out.push(path);
        }
    }
}

#[tokio::test]
async fn test_scenario_generates_two_files() {
    let project = Project::new(SCENARIO);

    let report = generate_with_config(&project.config, project.search_source())
        .await
        .unwrap();

    let base = project.root().join("models/customers/acme/prod");
    assert_eq!(
        report.files,
        vec![
            base.join("cdm_acme_orders.sql"),
            base.join("cdm_acme_invoices.sql")
        ]
    );
    assert_eq!(
        fs::read_to_string(base.join("cdm_acme_orders.sql")).unwrap(),
        "select * from orders where tenant='acme'"
    );
    assert_eq!(
        fs::read_to_string(base.join("cdm_acme_invoices.sql")).unwrap(),
        "select * from invoices where tenant='acme'"
    );
    assert_eq!(exit_status(&Ok::<_, GenError>(report)), exit::SUCCESS);
}

#[tokio::test]
async fn test_cross_product_across_specs() -> anyhow::Result<()> {
    let project = Project::new(
        r#"
dynamic_models:
  - name: "cdm_{customer}_{model}"
    location: "models/customers/{customer}/{customer_env}"
    sql: "select * from {model} where tenant='{customer}'"
    params:
      - query: "select customer, customer_env from tenants where active = 1 order by customer"
      - query: "select table_name from cdm_tables order by position"
  - name: "stg_{model}"
    location: "models/staging/{customer}"
    sql: "-- {customer}\nselect * from raw_{customer}.{model}"
    params:
      - query: "select customer as CUSTOMER, customer_env as CUSTOMER_ENV from tenants order by customer"
      - query: "select table_name as TABLE_NAME from cdm_tables order by position"
"#,
    );

    let report = generate_with_config(&project.config, project.search_source()).await?;

    assert_eq!(report.specs_processed, 2);
    // 2 active customers x 2 models, then 3 customers x 2 models
    assert_eq!(report.files.len(), 4 + 6);
    assert_eq!(project.sql_files().len(), 10);
    assert_eq!(
        fs::read_to_string(project.root().join("models/staging/initech/stg_invoices.sql"))?,
        "-- initech\nselect * from raw_initech.invoices"
    );
    Ok(())
}

#[tokio::test]
async fn test_second_run_is_byte_identical() -> anyhow::Result<()> {
    let project = Project::new(SCENARIO);

    let first = generate_with_config(&project.config, project.search_source()).await?;
    let before: Vec<Vec<u8>> = project.sql_files().iter().map(fs::read).collect::<Result<_, _>>()?;

    let second = generate_with_config(&project.config, project.search_source()).await?;
    let after: Vec<Vec<u8>> = project.sql_files().iter().map(fs::read).collect::<Result<_, _>>()?;

    assert_eq!(first.files, second.files);
    assert_eq!(before, after);
    Ok(())
}

#[tokio::test]
async fn test_missing_customer_env_aborts_before_writing() {
    let project = Project::new(
        r#"
dynamic_models:
  - name: "cdm_{customer}_{model}"
    location: "models/customers/{customer}/{customer_env}"
    sql: "select 1"
    params:
      - query: "select customer from tenants"
      - query: "select table_name from cdm_tables"
"#,
    );

    let result = generate_with_config(&project.config, project.search_source()).await;

    match &result {
        Err(GenError::MissingField { field, .. }) => assert_eq!(field, "customer_env"),
        other => panic!("expected MissingField, got {other:?}"),
    }
    assert_eq!(exit_status(&result), exit::RUN_FAILED);
    assert!(project.sql_files().is_empty());
}

#[tokio::test]
async fn test_model_placeholder_in_location_is_rejected() {
    let project = Project::new(
        r#"
dynamic_models:
  - name: "cdm_{customer}"
    location: "models/{model}"
    sql: "select 1"
    params:
      - query: "select customer, customer_env from tenants"
      - query: "select table_name from cdm_tables"
"#,
    );

    let err = generate_with_config(&project.config, project.search_source())
        .await
        .unwrap_err();

    assert!(matches!(err, GenError::TemplateBinding { ref key, .. } if key == "model"));
    assert!(project.sql_files().is_empty());
}

#[tokio::test]
async fn test_broken_query_names_the_query() {
    let project = Project::new(
        r#"
dynamic_models:
  - name: "cdm_{customer}_{model}"
    location: "models/{customer}"
    sql: "select 1"
    params:
      - query: "select customer, customer_env from no_such_table"
      - query: "select table_name from cdm_tables"
"#,
    );

    let err = generate_with_config(&project.config, project.search_source())
        .await
        .unwrap_err();

    match err {
        GenError::QueryExecutionFailed { query, .. } => assert!(query.contains("no_such_table")),
        other => panic!("expected QueryExecutionFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_duplicate_rows_overwrite_the_same_file() {
    let project = Project::new(
        r#"
dynamic_models:
  - name: "cdm_{customer}_{model}"
    location: "models/{customer}"
    sql: "select * from {model}"
    params:
      - query: "select 'acme' as customer, 'prod' as customer_env union all select 'acme', 'prod'"
      - query: "select table_name from cdm_tables where table_name = 'orders'"
"#,
    );

    let report = generate_with_config(&project.config, project.search_source())
        .await
        .unwrap();

    assert_eq!(report.files.len(), 2);
    assert_eq!(report.files[0], report.files[1]);
    assert_eq!(project.sql_files().len(), 1);
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let mut project = Project::new(SCENARIO);
    project.config.dry_run = true;

    let report = generate_with_config(&project.config, project.search_source())
        .await
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.files.len(), 2);
    assert!(project.sql_files().is_empty());
}

#[tokio::test]
async fn test_explicit_project_root() {
    let project = Project::new(SCENARIO);

    let report = generate_with_config(
        &project.config,
        ConfigSource::Root(project.root().to_path_buf()),
    )
    .await
    .unwrap();

    assert_eq!(report.files.len(), 2);
}

#[tokio::test]
async fn test_integer_tenant_ids_render_as_text() {
    let project = Project::new(
        r#"
dynamic_models:
  - name: "cdm_{customer}_{model}"
    location: "models/tenants/{customer}"
    sql: "select * from {model} where tenant_id = {customer}"
    params:
      - query: "select 42 as customer, 'prod' as customer_env"
      - query: "select table_name from cdm_tables where table_name = 'orders'"
"#,
    );

    generate_with_config(&project.config, project.search_source())
        .await
        .unwrap();

    assert_eq!(
        fs::read_to_string(project.root().join("models/tenants/42/cdm_42_orders.sql")).unwrap(),
        "select * from orders where tenant_id = 42"
    );
}
