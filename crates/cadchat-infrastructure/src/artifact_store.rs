//! Local storage for downloaded artifacts.

use std::path::{Path, PathBuf};

use cadchat_core::dispatch::DownloadRequest;
use cadchat_core::error::Result;

/// Writes downloaded artifacts as `{dir}/{object_id}.{ext}`.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Target path for a request.
    pub fn path_for(&self, request: &DownloadRequest) -> PathBuf {
        self.dir.join(request.file_name())
    }

    /// Saves `bytes`, replacing any earlier download of the same artifact.
    pub async fn save(&self, request: &DownloadRequest, bytes: &[u8]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(request);
        tokio::fs::write(&path, bytes).await?;
        tracing::info!(
            "[ArtifactStore] Saved {} ({} bytes)",
            path.display(),
            bytes.len()
        );
        Ok(path)
    }
}
