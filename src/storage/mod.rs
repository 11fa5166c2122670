//! Object storage
//!
//! The storage backend is a narrow capability: `get` and `put` on
//! bucket/key pairs. The service holds one shared handle constructed at
//! startup; nothing mutates it afterwards, so it is safe across
//! concurrent requests.

pub mod transfer;

use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{CaptionError, Result};

/// Capability interface for the object store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an object's bytes
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes>;

    /// Store an object, overwriting any existing one
    async fn put(&self, bucket: &str, key: &str, data: Bytes) -> Result<()>;
}

/// Filesystem-backed object store: buckets are directories under `root`
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.root.join(bucket).join(key)
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes> {
        let path = self.object_path(bucket, key);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(CaptionError::RemoteNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            Err(e) => Err(CaptionError::RemoteError(format!(
                "{}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn put(&self, bucket: &str, key: &str, data: Bytes) -> Result<()> {
        let path = self.object_path(bucket, key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CaptionError::RemoteError(format!("{}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| CaptionError::RemoteError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}
