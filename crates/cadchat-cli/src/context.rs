//! Composition root: wires config, backend, scene and use case together.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use cadchat_application::StudioUseCase;
use cadchat_core::config::ClientConfig;
use cadchat_core::result::RenderMode;
use cadchat_core::scene::SceneBuilder;
use cadchat_infrastructure::{ArtifactStore, CadchatPaths, ConfigService, HeadlessEngine, HttpCadBackend};

pub struct AppContext {
    pub config: ClientConfig,
    pub studio: StudioUseCase<HeadlessEngine>,
    pub artifacts: ArtifactStore,
}

impl AppContext {
    pub fn load(config_path: Option<PathBuf>, server: Option<String>) -> Result<Self> {
        let service = match config_path {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new(),
        };
        let mut config = service.get_config().context("Failed to load configuration")?;
        if let Some(server) = server {
            config.backend.base_url = server;
        }

        let backend = Arc::new(HttpCadBackend::new(&config.backend));
        tracing::info!("[AppContext] Using CAD service at {}", backend.base_url());

        let scene = SceneBuilder::mount(
            HeadlessEngine::new(),
            config.viewer.clone(),
            config.render.clone(),
        )
        .context("Failed to mount the viewer")?;

        let downloads = CadchatPaths::resolve_downloads_dir(config.downloads_dir.as_deref())
            .context("Failed to resolve the downloads directory")?;

        Ok(Self {
            studio: StudioUseCase::new(backend, scene, config.default_mode),
            artifacts: ArtifactStore::new(downloads),
            config,
        })
    }
}

/// Parses a user-supplied render mode ("2d", "3D", ...).
pub fn parse_mode(raw: &str) -> Result<RenderMode> {
    raw.parse::<RenderMode>()
        .map_err(|_| anyhow::anyhow!("Unknown render mode '{}', expected 2d or 3d", raw))
}
