//! Write rendered artifacts under the project root

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use super::task::OutputArtifact;
use crate::config::defaults;
use crate::error::{GenError, Result};

/// `<project_root>/<location>/<name>.sql`
pub fn artifact_path(project_root: &Path, location: &str, name: &str) -> PathBuf {
    project_root
        .join(location)
        .join(format!("{}.{}", name, defaults::OUTPUT_EXTENSION))
}

/// Writes artifacts, creating parent directories and overwriting existing
/// files.
#[derive(Debug, Clone, Default)]
pub struct FileMaterializer {
    dry_run: bool,
}

impl FileMaterializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log planned paths instead of writing
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn write_artifact(&self, artifact: &OutputArtifact) -> Result<()> {
        self.write(&artifact.path, &artifact.content)
    }

    /// Write `content` to `path`.
    ///
    /// The content goes to a temporary file in the destination directory which
    /// is then renamed over `path`, so readers never see a half-written file.
    pub fn write(&self, path: &Path, content: &str) -> Result<()> {
        if self.dry_run {
            info!("Would generate: {}", path.display());
            return Ok(());
        }

        let fs_err = |source: std::io::Error| GenError::FileSystem {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(fs_err)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(fs_err)?;
        tmp.write_all(content.as_bytes()).map_err(fs_err)?;
        tmp.as_file().sync_all().map_err(fs_err)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))
                .map_err(fs_err)?;
        }
        tmp.persist(path).map_err(|e| fs_err(e.error))?;

        info!("File generated: {}", path.display());
        Ok(())
    }
}
