//! Blob storage for uploaded images.
//!
//! Blobs live in a single flat directory, one file per storage name:
//! ```text
//! {base_path}/
//! ├── 3f2b9a4e-6c1d-4f0a-9b7e-2d5c8a1e0f34.png
//! └── 9d0c7e21-55aa-4b1f-8e3d-0a6b4c2f7d18.gif
//! ```

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

use super::naming::is_safe_storage_name;
use crate::{ImgdropError, Result};

/// File storage rooted at the upload directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base directory for stored blobs.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new FileStorage with the given base path.
    ///
    /// The base directory will be created if it doesn't exist.
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let storage = Self {
            base_path: base_path.into(),
        };
        storage.ensure_root().await?;
        Ok(storage)
    }

    /// Create the base directory if it is missing. Idempotent.
    pub async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Write `content` under `stored_name`, replacing any existing file.
    pub async fn save(&self, stored_name: &str, content: &[u8]) -> Result<()> {
        let file_path = self.file_path(stored_name)?;
        fs::write(&file_path, content).await?;
        Ok(())
    }

    /// Read the blob stored under `stored_name`.
    pub async fn load(&self, stored_name: &str) -> Result<Vec<u8>> {
        let file_path = self.file_path(stored_name)?;

        match fs::read(&file_path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ImgdropError::NotFound(format!("File: {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a blob exists in storage.
    pub async fn exists(&self, stored_name: &str) -> bool {
        match self.file_path(stored_name) {
            Ok(path) => fs::try_exists(path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Full path for a stored name.
    ///
    /// Fails with [`ImgdropError::InvalidName`] if the name could resolve
    /// outside the base directory.
    pub fn file_path(&self, stored_name: &str) -> Result<PathBuf> {
        if !is_safe_storage_name(stored_name) {
            return Err(ImgdropError::InvalidName(stored_name.to_string()));
        }
        Ok(self.base_path.join(stored_name))
    }
}
