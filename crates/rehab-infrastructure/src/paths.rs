//! Path management for Rehability configuration files.
//!
//! ```text
//! ~/.config/rehability/      # Config directory (platform config dir)
//! └── config.toml            # Application configuration
//! ```

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "rehability";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves where Rehability keeps its files.
///
/// A base directory override replaces the platform config directory, which
/// keeps tests inside a temp dir.
#[derive(Debug, Clone, Default)]
pub struct RehabPaths {
    base_dir: Option<PathBuf>,
}

impl RehabPaths {
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the Rehability configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CONFIG_FILE_NAME))
    }
}
