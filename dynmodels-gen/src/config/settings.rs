//! Configuration settings for dynmodels-gen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use super::defaults;
use crate::error::{GenError, Result};

/// Run configuration, built once at startup and passed down by reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenConfig {
    /// Backend connection settings
    #[serde(default)]
    pub backend: BackendSettings,

    /// Dry run mode - resolve and render without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl GenConfig {
    /// Load configuration using config-rs (file + environment variables).
    ///
    /// When `config_path` is `None`, an optional `dynmodels.toml` in the
    /// working directory is used. Environment variables such as
    /// `DYNMODELS_BACKEND__PASSWORD` override file values.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(config_path, environment())
    }

    fn load_with_env(config_path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder = builder.add_source(File::with_name(defaults::CONFIG_FILE_STEM).required(false));
        }

        builder = builder.add_source(env);

        let config: GenConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }
}

/// Every value stays a string; serde converts `port` and `dry_run`.
fn environment() -> Environment {
    Environment::with_prefix(defaults::ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// Which relational backend answers the metadata queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Mysql,
    Sqlite,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Mysql => f.write_str("mysql"),
            BackendKind::Sqlite => f.write_str("sqlite"),
        }
    }
}

/// Named connection parameters consumed by connection setup.
///
/// Which values are required depends on [`BackendKind`]; see
/// [`BackendSettings::validate`]. Unknown names are rejected rather than
/// silently dropped.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendSettings {
    #[serde(default)]
    pub kind: BackendKind,

    /// Account or host name
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub database: Option<String>,

    /// Database file for the sqlite backend
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl fmt::Debug for BackendSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSettings")
            .field("kind", &self.kind)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .field("path", &self.path)
            .finish()
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

impl BackendSettings {
    /// Check that every value the selected backend needs is set.
    ///
    /// Empty strings count as missing. All missing names are reported at once.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();

        match self.kind {
            BackendKind::Mysql => {
                for (name, value) in [
                    ("host", &self.host),
                    ("username", &self.username),
                    ("password", &self.password),
                    ("database", &self.database),
                ] {
                    if !present(value) {
                        missing.push(name);
                    }
                }
            }
            BackendKind::Sqlite => {
                if self.path.as_ref().map_or(true, |p| p.as_os_str().is_empty()) {
                    missing.push("path");
                }
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(GenError::ConfigError(format!(
                "{} backend requires: {} (set [backend] in the config file or {}_BACKEND__<NAME>)",
                self.kind,
                missing.join(", "),
                defaults::ENV_PREFIX
            )))
        }
    }

    /// Port to connect to, falling back to the backend default.
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(defaults::MYSQL_PORT)
    }
}
