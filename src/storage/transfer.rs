//! Transfers between the object store and local disk

use bytes::Bytes;
use std::path::Path;

use crate::error::{CaptionError, Result};
use crate::storage::ObjectStore;

/// Download an object to a local file, creating parent directories as
/// needed
pub async fn download(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    local_path: &Path,
) -> Result<()> {
    let data = store.get(bucket, key).await?;

    if let Some(parent) = local_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CaptionError::LocalWriteError(format!("{}: {}", parent.display(), e)))?;
    }
    tokio::fs::write(local_path, &data)
        .await
        .map_err(|e| CaptionError::LocalWriteError(format!("{}: {}", local_path.display(), e)))?;

    tracing::info!(
        "Downloaded {}/{} to {}",
        bucket,
        key,
        local_path.display()
    );
    Ok(())
}

/// Upload a local file to the object store
pub async fn upload(
    store: &dyn ObjectStore,
    local_path: &Path,
    bucket: &str,
    key: &str,
) -> Result<()> {
    let data = tokio::fs::read(local_path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CaptionError::LocalNotFound(local_path.display().to_string())
        } else {
            CaptionError::LocalWriteError(format!(
                "failed to read upload source {}: {}",
                local_path.display(),
                e
            ))
        }
    })?;

    store.put(bucket, key, Bytes::from(data)).await?;

    tracing::info!("Uploaded {} to {}/{}", local_path.display(), bucket, key);
    Ok(())
}
