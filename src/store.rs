//! Key-value document store the builder persists into.
//!
//! Documents are JSON values addressed by `(collection, key)`. The user scope
//! is a property of the store instance, not of each call.

use dashmap::DashMap;
use serde_json::Value;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{BuilderError, BuilderResult};

pub trait DocumentStore: Send + Sync {
    /// `None` when the document does not exist.
    fn get_item(
        &self,
        collection: &str,
        key: &str,
    ) -> impl Future<Output = BuilderResult<Option<Value>>> + Send;

    fn set_item(
        &self,
        collection: &str,
        key: &str,
        value: Value,
    ) -> impl Future<Output = BuilderResult<()>> + Send;
}

/// In-process store for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: DashMap<(String, String), Value>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail until switched off again.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent reads fail until switched off again.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    async fn get_item(&self, collection: &str, key: &str) -> BuilderResult<Option<Value>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BuilderError::persistence(format!(
                "read of {}/{} failed",
                collection, key
            )));
        }
        Ok(self
            .documents
            .get(&(collection.to_string(), key.to_string()))
            .map(|entry| entry.value().clone()))
    }

    async fn set_item(&self, collection: &str, key: &str, value: Value) -> BuilderResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BuilderError::persistence(format!(
                "write of {}/{} failed",
                collection, key
            )));
        }
        self.documents
            .insert((collection.to_string(), key.to_string()), value);
        Ok(())
    }
}

/// One pretty-printed JSON file per document:
/// `<root>/<user>/<collection>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    user: String,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>, user: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            user: user.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path segments are restricted so keys cannot escape the user directory.
    fn document_path(&self, collection: &str, key: &str) -> BuilderResult<PathBuf> {
        for segment in [self.user.as_str(), collection, key] {
            let valid = !segment.is_empty()
                && segment != "."
                && segment != ".."
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
            if !valid {
                return Err(BuilderError::persistence(format!(
                    "invalid path segment '{}'",
                    segment
                )));
            }
        }
        Ok(self
            .root
            .join(&self.user)
            .join(collection)
            .join(format!("{}.json", key)))
    }
}

impl DocumentStore for FileStore {
    async fn get_item(&self, collection: &str, key: &str) -> BuilderResult<Option<Value>> {
        let path = self.document_path(collection, key)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(BuilderError::persistence(format!(
                    "read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        let value = serde_json::from_slice(&bytes)?;
        Ok(Some(value))
    }

    async fn set_item(&self, collection: &str, key: &str, value: Value) -> BuilderResult<()> {
        let path = self.document_path(collection, key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                BuilderError::persistence(format!("create {}: {}", parent.display(), e))
            })?;
        }
        let bytes = serde_json::to_vec_pretty(&value)?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| BuilderError::persistence(format!("write {}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "document written");
        Ok(())
    }
}
