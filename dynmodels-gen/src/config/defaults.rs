//! Default configuration values - single source of truth

/// Entry whose presence marks the project root
pub const ROOT_MARKER: &str = ".git";

/// Model config location, relative to the project root
pub const MODEL_CONFIG_PATH: &str = "models/dynamic_models.yml";

/// Extension appended to every rendered file name
pub const OUTPUT_EXTENSION: &str = "sql";

/// Prefix for environment variable overrides (`DYNMODELS_BACKEND__HOST`, ...)
pub const ENV_PREFIX: &str = "DYNMODELS";

/// Config file looked up in the working directory when `--config` is absent
pub const CONFIG_FILE_STEM: &str = "dynmodels";

/// Default MySQL port
pub const MYSQL_PORT: u16 = 3306;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;
