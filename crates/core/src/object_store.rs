//! Object storage for uploaded media (cover images).
//!
//! The service only needs three operations from a blob store: write an
//! object, resolve its public URL, and delete it again when a later step of
//! the upload fails. [`ObjectStore`] is the seam; [`LocalObjectStore`] writes
//! under a directory that the API serves statically, [`MemoryObjectStore`]
//! keeps objects in memory for tests and fixture deployments.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid object path: {0}")]
    InvalidPath(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Minimal blob store interface used by the upload flow.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `path`, replacing any existing object.
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<(), StorageError>;

    /// Public URL under which `path` is served.
    fn public_url(&self, path: &str) -> String;

    /// Delete the object at `path`. Missing objects yield [`StorageError::NotFound`].
    async fn remove(&self, path: &str) -> Result<(), StorageError>;
}

/// Reject absolute paths, `..` segments and empty keys.
pub fn validate_object_path(path: &str) -> Result<(), StorageError> {
    if path.is_empty() || path.starts_with('/') || path.contains('\\') {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    let all_normal = Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !all_normal {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(())
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

// ---------------------------------------------------------------------------
// Local filesystem
// ---------------------------------------------------------------------------

/// Stores objects as files below `root`.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        validate_object_path(path)?;
        Ok(self.root.join(path))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &bytes).await?;
        tracing::debug!(path, size = bytes.len(), "Object written");
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        join_url(&self.public_base_url, path)
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// A stored object held by [`MemoryObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Keeps objects in a map. Nothing is served over HTTP.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    public_base_url: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryObjectStore {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.read().await.get(path).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        validate_object_path(path)?;
        self.objects.write().await.insert(
            path.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        join_url(&self.public_base_url, path)
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        validate_object_path(path)?;
        self.objects
            .write()
            .await
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_traversal_and_absolute_paths() {
        assert!(validate_object_path("../etc/passwd").is_err());
        assert!(validate_object_path("covers/../../x").is_err());
        assert!(validate_object_path("/covers/a.png").is_err());
        assert!(validate_object_path("").is_err());
        assert!(validate_object_path("covers/a.png").is_ok());
    }

    #[test]
    fn public_url_joins_without_double_slash() {
        let store = LocalObjectStore::new("/tmp", "https://cdn.example.com/media/");
        assert_eq!(
            store.public_url("covers/a.png"),
            "https://cdn.example.com/media/covers/a.png"
        );
    }

    #[tokio::test]
    async fn local_store_writes_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path(), "/media");

        store
            .upload("covers/a.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();
        let written = tokio::fs::read(dir.path().join("covers/a.png")).await.unwrap();
        assert_eq!(written, vec![1, 2, 3]);

        store.remove("covers/a.png").await.unwrap();
        assert!(!dir.path().join("covers/a.png").exists());
    }

    #[tokio::test]
    async fn local_store_remove_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path(), "/media");
        let err = store.remove("covers/none.png").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryObjectStore::new("/media");
        store
            .upload("covers/b.webp", vec![9], "image/webp")
            .await
            .unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(
            store.get("covers/b.webp").await.unwrap().content_type,
            "image/webp"
        );

        store.remove("covers/b.webp").await.unwrap();
        assert!(store.is_empty().await);
    }
}
