//! Local filesystem storage backend.

use async_trait::async_trait;
use std::{
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};

use crate::server::{error::storage::StorageError, storage::FileStorage};

/// Stores files below `root`, served by the application under `{base_url}/files/`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Creates a backend rooted at `root`.
    ///
    /// # Arguments
    /// - `root` - Directory files are written below; created lazily on first write
    /// - `app_url` - Public base URL of the application without trailing slash
    pub fn new(root: impl Into<PathBuf>, app_url: &str) -> Self {
        Self {
            root: root.into(),
            base_url: format!("{}/files", app_url.trim_end_matches('/')),
        }
    }

    /// Resolves a key to a path below the root, rejecting anything that could escape it.
    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);

        let only_normal = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if key.is_empty() || !only_normal {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStorage for LocalStorage {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!("Stored {} bytes at {}", bytes.len(), path.display());

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Stored file {} already gone", path.display());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_and_deletes_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:8080");

        storage.put("works/a/b.png", b"png").await.unwrap();
        let written = tokio::fs::read(dir.path().join("works/a/b.png")).await.unwrap();
        assert_eq!(written, b"png");

        storage.delete("works/a/b.png").await.unwrap();
        assert!(!dir.path().join("works/a/b.png").exists());
    }

    #[tokio::test]
    async fn deleting_missing_file_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:8080");

        assert!(storage.delete("works/none.png").await.is_ok());
    }

    #[tokio::test]
    async fn rejects_keys_escaping_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:8080");

        for key in ["../evil", "/etc/passwd", "works/../../evil", ""] {
            assert!(matches!(
                storage.put(key, b"x").await,
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn builds_public_url() {
        let storage = LocalStorage::new("/tmp/unused", "https://example.com/");

        assert_eq!(
            storage.url("works/a/b.png"),
            "https://example.com/files/works/a/b.png"
        );
    }
}
