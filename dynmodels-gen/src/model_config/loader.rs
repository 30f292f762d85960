//! Locate the project root and load the model config

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::model_spec::{DynamicModelsFile, ModelSpec};
use crate::config::defaults;
use crate::error::{GenError, Result};

/// Model specs together with the root they were loaded from.
///
/// Output paths are joined against `project_root`, so the root is found once
/// and shared by loading and writing.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub project_root: PathBuf,
    pub specs: Vec<ModelSpec>,
}

/// Walk upward from `start` until a directory containing the root marker is
/// found.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let start = if start.is_absolute() {
        start.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(start))
            .unwrap_or_else(|_| start.to_path_buf())
    };

    start
        .ancestors()
        .find(|dir| dir.join(defaults::ROOT_MARKER).exists())
        .map(Path::to_path_buf)
}

/// Find the project root above `start` and load its model config.
pub fn load(start: &Path) -> Result<LoadedConfig> {
    let project_root = find_project_root(start).ok_or_else(|| GenError::ConfigNotFound {
        start: start.to_path_buf(),
        marker: defaults::ROOT_MARKER,
    })?;
    debug!("Project root: {:?}", project_root);
    load_from(&project_root)
}

/// Load the model config of a known project root.
pub fn load_from(project_root: &Path) -> Result<LoadedConfig> {
    let path = project_root.join(defaults::MODEL_CONFIG_PATH);
    if !path.is_file() {
        return Err(GenError::ConfigMissing(path));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| GenError::ConfigMalformed {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    let specs = parse_model_config(&path, &content)?;
    info!("Loaded {} dynamic model(s) from {:?}", specs.len(), path);

    Ok(LoadedConfig {
        project_root: project_root.to_path_buf(),
        specs,
    })
}

/// Parse model config content. `path` is only used in error messages.
pub fn parse_model_config(path: &Path, content: &str) -> Result<Vec<ModelSpec>> {
    serde_yaml::from_str::<DynamicModelsFile>(content)
        .map(|file| file.dynamic_models)
        .map_err(|e| GenError::ConfigMalformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}
