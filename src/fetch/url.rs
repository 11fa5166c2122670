//! Video URL recognition

use url::Url;

use crate::error::{CaptionError, Result};

/// Extract the video identifier from a YouTube URL.
///
/// Recognized shapes are `youtube.com/watch?v=<id>` (any query-parameter
/// order) and the `youtu.be/<id>` short form. Anything else fails with
/// `UnsupportedUrl`.
pub fn extract_video_id(raw: &str) -> Result<String> {
    let parsed =
        Url::parse(raw).map_err(|_| CaptionError::UnsupportedUrl(raw.to_string()))?;

    match parsed.host_str() {
        Some("www.youtube.com") | Some("youtube.com") => parsed
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CaptionError::UnsupportedUrl(raw.to_string())),
        Some("youtu.be") => {
            let id = parsed.path().trim_start_matches('/');
            if id.is_empty() {
                Err(CaptionError::UnsupportedUrl(raw.to_string()))
            } else {
                Ok(id.to_string())
            }
        }
        _ => Err(CaptionError::UnsupportedUrl(raw.to_string())),
    }
}
