//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the client configuration
//! from the configuration file (~/.config/cadchat/config.toml).

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use cadchat_core::config::ClientConfig;
use cadchat_core::error::{CadError, Result};

use crate::paths::CadchatPaths;

/// Environment variable overriding `backend.base_url`.
pub const BASE_URL_ENV: &str = "CADCHAT_BASE_URL";

/// Configuration service that loads and caches the client configuration.
///
/// A missing file yields the defaults; a malformed one is an error.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file, or the platform default when `None`
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService reading the default config file.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a ConfigService reading `path` instead of the default file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Path of the config file this service reads.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => CadchatPaths::config_file(),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// `CADCHAT_BASE_URL` overrides the configured backend URL.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let cached = self
                .config
                .read()
                .map_err(|_| CadError::internal("config cache lock poisoned"))?;
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = Self::load_from(&self.config_path()?)?;
        let loaded = apply_env_overrides(loaded, |key| std::env::var(key).ok());

        let mut cached = self
            .config
            .write()
            .map_err(|_| CadError::internal("config cache lock poisoned"))?;
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    /// Writes `config` to the config file and refreshes the cache.
    pub fn save_config(&self, config: &ClientConfig) -> Result<()> {
        let path = self.config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(config)?)?;
        tracing::info!("[ConfigService] Saved config to {}", path.display());

        self.invalidate_cache();
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut cached) = self.config.write() {
            *cached = None;
        }
    }

    fn load_from(path: &Path) -> Result<ClientConfig> {
        if !path.exists() {
            tracing::debug!(
                "[ConfigService] No config at {}, using defaults",
                path.display()
            );
            return Ok(ClientConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content).map_err(|e| {
            CadError::config(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        tracing::debug!("[ConfigService] Loaded config from {}", path.display());
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
        tracing::debug!("[ConfigService] {} overrides backend URL", BASE_URL_ENV);
        config.backend.base_url = url;
    }
    config
}
