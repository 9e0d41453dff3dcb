//! Vault output
//!
//! Paths handed to a [`VaultWriter`] are vault-relative and use `/` as the
//! separator, e.g. `Get笔记/Foo.md`. Writing an existing path replaces it.

use crate::error::{ImportError, ImportResult};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

#[async_trait]
pub trait VaultWriter: Send + Sync {
    async fn folder_exists(&self, folder: &str) -> ImportResult<bool>;

    async fn create_folder(&self, folder: &str) -> ImportResult<()>;

    /// Write `contents` to `path`, overwriting any existing file.
    async fn write(&self, path: &str, contents: &str) -> ImportResult<()>;
}

/// Writes into a vault directory on disk
#[derive(Debug, Clone)]
pub struct FsVaultWriter {
    root: PathBuf,
}

impl FsVaultWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |path, part| path.join(part))
    }
}

#[async_trait]
impl VaultWriter for FsVaultWriter {
    async fn folder_exists(&self, folder: &str) -> ImportResult<bool> {
        let path = self.resolve(folder);
        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ImportError::write(path, e)),
        }
    }

    async fn create_folder(&self, folder: &str) -> ImportResult<()> {
        let path = self.resolve(folder);
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|e| ImportError::write(&path, e))?;
        debug!(path = %path.display(), "created output folder");
        Ok(())
    }

    async fn write(&self, path: &str, contents: &str) -> ImportResult<()> {
        let full = self.resolve(path);
        tokio::fs::write(&full, contents)
            .await
            .map_err(|e| ImportError::write(&full, e))
    }
}

/// Key-value vault kept in memory, used by tests and dry runs
#[derive(Debug, Default)]
pub struct InMemoryVaultWriter {
    folders: Mutex<BTreeSet<String>>,
    files: Mutex<BTreeMap<String, String>>,
}

impl InMemoryVaultWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every written file, keyed by path
    pub fn files(&self) -> BTreeMap<String, String> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(path)
            .cloned()
    }

    pub fn has_folder(&self, folder: &str) -> bool {
        self.folders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(folder)
    }
}

#[async_trait]
impl VaultWriter for InMemoryVaultWriter {
    async fn folder_exists(&self, folder: &str) -> ImportResult<bool> {
        Ok(self.has_folder(folder))
    }

    async fn create_folder(&self, folder: &str) -> ImportResult<()> {
        self.folders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(folder.to_string());
        Ok(())
    }

    async fn write(&self, path: &str, contents: &str) -> ImportResult<()> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(path.to_string(), contents.to_string());
        Ok(())
    }
}
