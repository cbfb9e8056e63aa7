//! Configuration service backed by `config.toml`.

use crate::paths::RehabPaths;
use crate::storage::AtomicTomlFile;
use rehab_core::RehabError;
use rehab_core::config::RehabConfig;
use rehab_core::error::Result;
use std::path::{Path, PathBuf};

/// Loads and edits the application configuration.
///
/// A missing file is not an error: defaults apply until the first edit
/// writes the file.
pub struct ConfigService {
    file: AtomicTomlFile<RehabConfig>,
}

impl ConfigService {
    /// Uses the platform configuration directory.
    pub fn new() -> Result<Self> {
        Self::with_base_dir(None)
    }

    /// Uses a custom base directory (for testing).
    pub fn with_base_dir(base_dir: Option<&Path>) -> Result<Self> {
        let path = RehabPaths::new(base_dir)
            .config_file()
            .map_err(|e| RehabError::config(e.to_string()))?;
        Ok(Self {
            file: AtomicTomlFile::new(path),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    pub fn load(&self) -> Result<RehabConfig> {
        let config = self.file.load()?.unwrap_or_default();
        tracing::debug!(
            "[ConfigService] Loaded config from {:?}: url={}, audio={}",
            self.file.path(),
            config.classifier_url,
            config.audio_enabled
        );
        Ok(config)
    }

    /// Applies `f` to the stored configuration and writes it back.
    pub fn update<F>(&self, f: F) -> Result<RehabConfig>
    where
        F: FnOnce(&mut RehabConfig),
    {
        let config = self.file.update(RehabConfig::default(), f)?;
        tracing::info!("[ConfigService] Saved config to {:?}", self.file.path());
        Ok(config)
    }

    pub fn set_audio_enabled(&self, enabled: bool) -> Result<RehabConfig> {
        self.update(|config| config.audio_enabled = enabled)
    }

    pub fn set_classifier_url(&self, url: &str) -> Result<RehabConfig> {
        let url = url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(RehabError::config(format!(
                "classifier_url must be an http(s) URL, got '{}'",
                url
            )));
        }
        let url = url.to_string();
        self.update(move |config| config.classifier_url = url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_base_dir(Some(temp_dir.path())).unwrap();
        assert_eq!(service.load().unwrap(), RehabConfig::default());
        assert!(!service.path().exists());
    }

    #[test]
    fn test_set_audio_persists() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_base_dir(Some(temp_dir.path())).unwrap();

        service.set_audio_enabled(false).unwrap();

        let reloaded = ConfigService::with_base_dir(Some(temp_dir.path()))
            .unwrap()
            .load()
            .unwrap();
        assert!(!reloaded.audio_enabled);
        assert_eq!(reloaded.throttle_ms, 200);
    }

    #[test]
    fn test_set_classifier_url_normalizes_and_validates() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_base_dir(Some(temp_dir.path())).unwrap();

        let config = service.set_classifier_url(" http://10.0.0.2:5000/ ").unwrap();
        assert_eq!(config.classifier_url, "http://10.0.0.2:5000");

        let err = service.set_classifier_url("ftp://nope").unwrap_err();
        assert!(matches!(err, RehabError::Config(_)));
        assert_eq!(service.load().unwrap().classifier_url, "http://10.0.0.2:5000");
    }
}
