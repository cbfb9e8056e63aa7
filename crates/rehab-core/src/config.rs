use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_classifier_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_throttle_ms() -> u64 {
    200
}

fn default_audio_enabled() -> bool {
    true
}

fn default_history_limit() -> usize {
    50
}

fn default_request_timeout_secs() -> u64 {
    10
}

/// Root configuration stored in `config.toml`.
///
/// Every field has a default, so a partial or missing file is valid.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RehabConfig {
    /// Base URL of the classifier/progress backend.
    #[serde(default = "default_classifier_url")]
    pub classifier_url: String,
    /// Session cookie forwarded to the login-gated backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
    /// Minimum milliseconds between classification requests.
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
    /// Whether feedback is spoken as well as shown.
    #[serde(default = "default_audio_enabled")]
    pub audio_enabled: bool,
    /// Maximum number of summaries listed in history.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl RehabConfig {
    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for RehabConfig {
    fn default() -> Self {
        Self {
            classifier_url: default_classifier_url(),
            session_cookie: None,
            throttle_ms: default_throttle_ms(),
            audio_enabled: default_audio_enabled(),
            history_limit: default_history_limit(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RehabConfig = toml::from_str("audio_enabled = false\n").unwrap();
        assert!(!config.audio_enabled);
        assert_eq!(config.classifier_url, "http://127.0.0.1:5000");
        assert_eq!(config.throttle_interval(), Duration::from_millis(200));
        assert_eq!(config.history_limit, 50);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: RehabConfig = toml::from_str("").unwrap();
        assert_eq!(config, RehabConfig::default());
    }
}
