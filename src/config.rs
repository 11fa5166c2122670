//! Server configuration

use serde::{Deserialize, Serialize};

/// Object storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory backing the filesystem object store
    pub root: String,

    /// Bucket receiving fetched caption files
    pub captions_bucket: String,

    /// Key prefix for fetched caption files within the bucket
    pub captions_folder: String,

    /// Key prefix for converted JSON output, always normalized to end
    /// with a path separator
    pub json_folder: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: "/var/lib/caption-server/storage".to_string(),
            captions_bucket: "captions".to_string(),
            captions_folder: "captions".to_string(),
            json_folder: "converted_json/".to_string(),
        }
    }
}

impl StorageConfig {
    /// Get the JSON destination prefix, guaranteed to end with '/'
    pub fn json_prefix(&self) -> String {
        if self.json_folder.ends_with('/') {
            self.json_folder.clone()
        } else {
            format!("{}/", self.json_folder)
        }
    }
}

/// Caption fetching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Path to the yt-dlp executable
    pub ytdlp_path: String,

    /// Subtitle language requested from the downloader
    pub subtitle_lang: String,

    /// Local directory caption files are downloaded into
    pub download_dir: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: "yt-dlp".to_string(),
            subtitle_lang: "en".to_string(),
            download_dir: "/tmp/downloads".to_string(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Object storage configuration
    pub storage: StorageConfig,

    /// Caption fetching configuration
    pub fetch: FetchConfig,

    /// Enable CORS
    pub cors_enabled: bool,

    /// Log level
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            storage: StorageConfig::default(),
            fetch: FetchConfig::default(),
            cors_enabled: true,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string for binding
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
