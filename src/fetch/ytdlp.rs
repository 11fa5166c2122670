//! yt-dlp subprocess wrapper
//!
//! The external downloader is only trusted as far as its output contract:
//! a zero exit status alone proves nothing, so the expected caption file
//! path and the metadata line count are both checked explicitly.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;

use crate::error::{CaptionError, Result};
use crate::fetch::extract_video_id;

/// Video metadata reported by the downloader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub id: String,
    pub title: String,
}

/// Capability interface for obtaining caption tracks and metadata
#[async_trait]
pub trait SubtitleFetcher: Send + Sync {
    /// Download the caption track for `url` into `output_dir`, returning
    /// the local path of the subtitle file
    async fn fetch_subtitle_track(&self, url: &str, output_dir: &Path) -> Result<PathBuf>;

    /// Fetch the video id and title for `url` without downloading anything
    async fn fetch_metadata(&self, url: &str) -> Result<VideoMetadata>;
}

/// Concrete fetcher shelling out to yt-dlp
pub struct YtDlpFetcher {
    executable: String,
    lang: String,
}

impl YtDlpFetcher {
    pub fn new(executable: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            lang: lang.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<Output> {
        let output = Command::new(&self.executable)
            .args(args)
            .output()
            .await
            .map_err(|e| {
                CaptionError::FetchFailed(format!("failed to run {}: {}", self.executable, e))
            })?;

        if !output.status.success() {
            return Err(CaptionError::FetchFailed(format!(
                "{} exited with {}: {}",
                self.executable,
                output.status,
                combined_output(&output)
            )));
        }
        Ok(output)
    }
}

#[async_trait]
impl SubtitleFetcher for YtDlpFetcher {
    async fn fetch_subtitle_track(&self, url: &str, output_dir: &Path) -> Result<PathBuf> {
        let video_id = extract_video_id(url)?;

        std::fs::create_dir_all(output_dir).map_err(|e| {
            CaptionError::LocalWriteError(format!("{}: {}", output_dir.display(), e))
        })?;

        // yt-dlp names the track <id>.<lang>.vtt under the -o template below
        let caption_path = output_dir.join(format!("{}.{}.vtt", video_id, self.lang));

        if caption_path.exists() {
            tracing::info!(
                "Caption file {} already exists, skipping download",
                caption_path.display()
            );
            return Ok(caption_path);
        }

        let template = format!("{}/%(id)s.%(ext)s", output_dir.display());
        tracing::info!("Downloading captions for {} into {}", url, output_dir.display());
        self.run(&[
            "--write-subs",
            "--write-auto-subs",
            "--no-warnings",
            "--sub-langs",
            self.lang.as_str(),
            "--skip-download",
            "-o",
            template.as_str(),
            url,
        ])
        .await?;

        // The tool exits zero even when no track in the requested language
        // exists, so the expected path is the real success signal.
        if !caption_path.exists() {
            return Err(CaptionError::FetchFailed(format!(
                "caption file not found at {}",
                caption_path.display()
            )));
        }

        tracing::info!("Downloaded caption file {}", caption_path.display());
        Ok(caption_path)
    }

    async fn fetch_metadata(&self, url: &str) -> Result<VideoMetadata> {
        let output = self
            .run(&["--get-id", "--get-title", "--no-warnings", "--skip-download", url])
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let lines: Vec<&str> = stdout.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

        // Positional contract: yt-dlp prints the title first, then the id,
        // regardless of flag order.
        match lines.as_slice() {
            [title, id] => Ok(VideoMetadata {
                id: id.to_string(),
                title: title.to_string(),
            }),
            _ => Err(CaptionError::FetchFailed(format!(
                "unexpected yt-dlp output, wanted 2 lines, got {}: {}",
                lines.len(),
                stdout.trim()
            ))),
        }
    }
}

fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(stderr);
    }
    text
}
