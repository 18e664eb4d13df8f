//! Flat-directory file store backing the HTTP surface

use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};

const MAX_FILENAME_LENGTH: usize = 255;

/// Thin wrapper over one storage root. Every stored file is identified
/// solely by its name; subdirectories are listed but never descended into.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            async_fs::create_dir_all(&self.root).await?;
        }
        Ok(())
    }

    /// Maps a client-supplied name onto the storage root. Names carrying
    /// path separators or parent references never leave the root.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let name = sanitize_file_name(name)?;
        Ok(self.root.join(name))
    }

    pub async fn list(&self) -> Result<Vec<String>> {
        let mut entries = async_fs::read_dir(&self.root).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().to_string());
        }

        Ok(names)
    }

    /// Creates or overwrites `root/name` with the given content.
    pub async fn save(&self, name: &str, data: &[u8]) -> Result<()> {
        let path = self.resolve(name)?;

        let mut file = async_fs::File::create(&path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;

        Ok(())
    }

    pub async fn remove(&self, name: &str) -> Result<()> {
        let path = self.resolve(name)?;
        async_fs::remove_file(&path).await?;
        Ok(())
    }
}

/// Rejects names that would escape the flat namespace.
pub fn sanitize_file_name(name: &str) -> Result<&str> {
    if name.is_empty() || name.len() > MAX_FILENAME_LENGTH {
        return Err(AppError::BadRequest(format!("Invalid filename: {}", name)));
    }

    if name.contains('\0') || name.contains('/') || name.contains('\\') {
        return Err(AppError::BadRequest(format!("Invalid filename: {}", name)));
    }

    if name == "." || name == ".." {
        return Err(AppError::BadRequest(format!("Invalid filename: {}", name)));
    }

    Ok(name)
}
