use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use uuid::Uuid;

/// Temporary resume files, one per session, under a single upload directory.
#[derive(Debug, Clone)]
pub struct ResumeUploads {
    dir: PathBuf,
}

impl ResumeUploads {
    /// Creates the directory if it is missing.
    pub async fn init(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create upload directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` under a fresh random `<hex>.pdf` name.
    pub async fn save(&self, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.dir.join(format!("{}.pdf", Uuid::new_v4().simple()));
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write upload {}", path.display()))?;
        Ok(path)
    }

    /// Best-effort delete. Failures are swallowed.
    pub async fn discard(&self, path: &Path) {
        if let Err(e) = tokio::fs::remove_file(path).await {
            debug!("Ignoring failure to delete {}: {e}", path.display());
        }
    }
}
