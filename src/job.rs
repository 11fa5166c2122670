//! End-to-end caption jobs
//!
//! One job processes exactly one subtitle file: obtain the input, convert
//! it, publish the result, and always clean up local temporaries. This is
//! the only layer allowed to swallow a failure (the event-driven path) or
//! hand it to the HTTP layer for translation (the request-driven path).

use std::path::{Path, PathBuf};

use crate::convert;
use crate::error::{CaptionError, Result};
use crate::state::AppState;
use crate::storage::transfer;

/// Handle an object-created storage event.
///
/// Non-VTT objects are filtered out (logged, not an error). Stage order is
/// strict: download, convert, upload. Failures are logged with full
/// context and swallowed, matching at-least-once event semantics: the
/// event is acknowledged regardless of the outcome.
pub async fn process_storage_event(state: &AppState, bucket: &str, name: &str) {
    let file_name = match Path::new(name).file_name() {
        Some(f) => PathBuf::from(f),
        None => {
            tracing::error!("Invalid object name in event: {}/{}", bucket, name);
            return;
        }
    };

    if file_name.extension().and_then(|e| e.to_str()) != Some("vtt") {
        tracing::info!("Skipping non-VTT object: {}/{}", bucket, name);
        return;
    }

    tracing::info!("Triggered by object {}/{}", bucket, name);

    let download_dir = PathBuf::from(&state.config.fetch.download_dir);
    let vtt_local = download_dir.join(&file_name);
    let mut json_local: Option<PathBuf> = None;

    let result = async {
        transfer::download(state.store.as_ref(), bucket, name, &vtt_local).await?;

        let json_path = convert::convert_file(&vtt_local, &download_dir)?;
        json_local = Some(json_path.clone());

        let json_name = json_path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default();
        let json_key = format!("{}{}", state.config.storage.json_prefix(), json_name);
        transfer::upload(state.store.as_ref(), &json_path, bucket, &json_key).await?;

        Ok::<(), CaptionError>(())
    }
    .await;

    if let Err(e) = result {
        tracing::error!("Failed to process {}/{}: {}", bucket, name, e);
    }

    cleanup_temp_files([Some(vtt_local), json_local].into_iter().flatten());
}

/// Fetch the caption track for a video URL and publish it to the
/// configured captions bucket, deleting the local copy afterwards.
/// Returns the uploaded file name.
pub async fn fetch_and_store(state: &AppState, url: &str) -> Result<String> {
    let download_dir = PathBuf::from(&state.config.fetch.download_dir);
    let caption_path = state
        .fetcher
        .fetch_subtitle_track(url, &download_dir)
        .await?;

    let file_name = caption_path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_default();
    let key = format!("{}/{}", state.config.storage.captions_folder, file_name);

    let uploaded = transfer::upload(
        state.store.as_ref(),
        &caption_path,
        &state.config.storage.captions_bucket,
        &key,
    )
    .await;

    cleanup_temp_files(std::iter::once(caption_path));
    uploaded?;

    Ok(file_name)
}

/// Best-effort removal of local temporaries. Failures are demoted to
/// warnings and never mask the job's outcome.
fn cleanup_temp_files(paths: impl Iterator<Item = PathBuf>) {
    for path in paths {
        if !path.exists() {
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::info!("Cleaned up temporary file {}", path.display()),
            Err(e) => tracing::warn!(
                "Failed to clean up temporary file {}: {}",
                path.display(),
                e
            ),
        }
    }
}
