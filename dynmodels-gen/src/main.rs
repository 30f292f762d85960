//! CLI entry point for dynmodels-gen

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dynmodels_gen::{exit, exit_status, model_config, ConfigSource, GenConfig};

#[derive(Parser)]
#[command(name = "dynmodels-gen")]
#[command(about = "Render per-tenant SQL model files from dynamic_models.yml")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the project root search starts from (defaults to the current directory)
    #[arg(long)]
    start_dir: Option<PathBuf>,

    /// Use this directory as the project root instead of searching for `.git`
    #[arg(long, conflicts_with = "start_dir")]
    project_root: Option<PathBuf>,

    /// Dry run - resolve and render without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every dynamic model file
    Generate,
    /// Print the parsed dynamic models (does not touch the backend)
    Inspect,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = match GenConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("An error occurred: {}", e);
            return ExitCode::from(exit::SETUP_FAILED);
        }
    };

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    if cli.dry_run {
        config.dry_run = true;
    }

    let source = match config_source(&cli) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("An error occurred: {:#}", e);
            return ExitCode::from(exit::SETUP_FAILED);
        }
    };

    if let Some(Commands::Inspect) = cli.command {
        return match inspect(&source) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("An error occurred: {:#}", e);
                ExitCode::from(exit::RUN_FAILED)
            }
        };
    }

    let result = dynmodels_gen::generate_with_config(&config, source).await;
    match &result {
        Ok(report) if report.dry_run => {
            println!("Dry run mode - would generate:");
            for path in &report.files {
                println!("  {}", path.display());
            }
        }
        Ok(report) => info!("Wrote {} file(s)", report.files.len()),
        Err(e) => {
            error!("{}", e);
            eprintln!("An error occurred: {}", e);
        }
    }

    ExitCode::from(exit_status(&result))
}

fn config_source(cli: &Cli) -> Result<ConfigSource> {
    if let Some(root) = &cli.project_root {
        return Ok(ConfigSource::Root(root.clone()));
    }
    let start = match &cli.start_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("cannot determine the current directory")?,
    };
    Ok(ConfigSource::Search(start))
}

fn inspect(source: &ConfigSource) -> Result<()> {
    let loaded = match source {
        ConfigSource::Search(start) => model_config::load(start)?,
        ConfigSource::Root(root) => model_config::load_from(root)?,
        ConfigSource::Loaded(loaded) => loaded.clone(),
    };

    println!("Project root: {}", loaded.project_root.display());
    println!("Parsed {} dynamic models:\n", loaded.specs.len());
    for (i, spec) in loaded.specs.iter().enumerate() {
        println!("Model #{}", i);
        println!("  name:     {}", spec.name);
        println!("  location: {}", spec.location);
        println!("  customers query: {}", spec.customer_query());
        println!("  models query:    {}", spec.model_query());
        println!("  sql:");
        for line in spec.sql.lines() {
            println!("    {}", line);
        }
        println!();
    }

    Ok(())
}
