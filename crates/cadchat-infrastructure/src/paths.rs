//! Unified path management for cadchat files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/cadchat/           # Config directory
//! └── config.toml              # Client configuration
//!
//! ~/Downloads/cadchat/         # Default artifact directory
//! └── {object_id}.{ext}
//! ```

use std::path::PathBuf;

use cadchat_core::error::{CadError, Result};

const APP_NAME: &str = "cadchat";

/// Unified path management for cadchat.
pub struct CadchatPaths;

impl CadchatPaths {
    /// Returns the cadchat configuration directory.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME))
            .ok_or_else(|| CadError::config("Cannot find the configuration directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default directory for downloaded artifacts.
    ///
    /// Falls back to the home directory when the platform has no download dir.
    pub fn downloads_dir() -> Result<PathBuf> {
        dirs::download_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join(APP_NAME))
            .ok_or_else(|| CadError::config("Cannot find a download directory"))
    }

    /// Resolves the configured artifact directory, expanding a leading `~`.
    pub fn resolve_downloads_dir(configured: Option<&str>) -> Result<PathBuf> {
        match configured {
            None => Self::downloads_dir(),
            Some(path) => match path.strip_prefix("~/") {
                Some(rest) => dirs::home_dir()
                    .map(|home| home.join(rest))
                    .ok_or_else(|| CadError::config("Cannot find home directory")),
                None => Ok(PathBuf::from(path)),
            },
        }
    }
}
