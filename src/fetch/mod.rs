//! Caption fetching
//!
//! Wraps the external downloader (yt-dlp) behind a narrow capability
//! interface:
//! - Video URL recognition and id extraction
//! - Subtitle track download with an explicit output-contract check
//! - Metadata lookup (id and title)

pub mod url;
pub mod ytdlp;

pub use self::url::extract_video_id;
pub use ytdlp::{SubtitleFetcher, VideoMetadata, YtDlpFetcher};
