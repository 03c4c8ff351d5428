/// Local image store
///
/// Uploads are written as `<uuid><ext>` so user-supplied names never reach the
/// filesystem. Lookups accept bare file names only.
use crate::error::{AppError, Result};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct AssetStore {
    dir: PathBuf,
    max_upload_bytes: usize,
}

impl AssetStore {
    pub fn new(dir: impl Into<PathBuf>, max_upload_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Stored name for an upload: a fresh UUID plus the original extension
    pub fn generate_filename(original: Option<&str>) -> String {
        let ext = original
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default();

        format!("{}{}", Uuid::new_v4(), ext)
    }

    /// Path for a bare file name inside the store
    pub fn resolve(&self, filename: &str) -> Result<PathBuf> {
        let is_plain_name = !filename.is_empty()
            && filename != "."
            && filename != ".."
            && !filename.contains(['/', '\\', '\0']);

        if !is_plain_name {
            return Err(AppError::BadRequest("Invalid file name".to_string()));
        }

        Ok(self.dir.join(filename))
    }

    pub async fn save(&self, filename: &str, bytes: &[u8]) -> Result<()> {
        let path = self.resolve(filename)?;
        self.ensure_dir().await?;
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "image stored");
        Ok(())
    }

    pub async fn read(&self, filename: &str) -> Result<Vec<u8>> {
        let path = self.resolve(filename)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound("Image does not exist".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
