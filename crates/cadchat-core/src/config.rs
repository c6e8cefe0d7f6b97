//! Client configuration model.
//!
//! Every field has a default so a partial (or missing) config file is valid.

use serde::{Deserialize, Serialize};

use crate::result::RenderMode;
use crate::scene::{RenderOptions, ViewerOptions};

/// Default address of the CAD generation service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";

/// Default request timeout; generation can take minutes.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for the remote CAD service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl BackendConfig {
    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub backend: BackendConfig,
    /// Mode a fresh conversation starts in
    pub default_mode: RenderMode,
    pub viewer: ViewerOptions,
    pub render: RenderOptions,
    /// Where downloaded artifacts are saved; platform download dir if unset
    pub downloads_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.backend.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.default_mode, RenderMode::ThreeD);
    }

    #[test]
    fn test_partial_config() {
        let config: ClientConfig = toml::from_str(
            r#"
            default_mode = "2d"
            downloads_dir = "/tmp/parts"

            [backend]
            base_url = "http://cad.local:8080/"

            [viewer]
            theme = "dark"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_mode, RenderMode::TwoD);
        assert_eq!(config.backend.base_url(), "http://cad.local:8080");
        assert_eq!(config.backend.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.downloads_dir.as_deref(), Some("/tmp/parts"));
        assert!(config.viewer.ortho);
    }
}
