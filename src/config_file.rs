//! Configuration file support
//!
//! Loads server configuration from TOML files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{FetchConfig, ServerConfig, StorageConfig};
use crate::error::{CaptionError, Result};

/// Configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Server settings
    pub server: ServerSettings,
    /// Object storage settings
    pub storage: StorageSettings,
    /// Caption fetching settings
    pub fetch: Option<FetchSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS
    pub cors_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Root directory backing the filesystem object store
    pub root: String,
    /// Bucket receiving fetched caption files
    pub captions_bucket: String,
    /// Key prefix for fetched caption files
    pub captions_folder: Option<String>,
    /// Key prefix for converted JSON output
    pub json_folder: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSettings {
    /// Path to the yt-dlp executable
    pub ytdlp_path: Option<String>,
    /// Subtitle language requested from the downloader
    pub subtitle_lang: Option<String>,
    /// Local directory caption files are downloaded into
    pub download_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CaptionError::Config(e.to_string()))?;
        let config: ConfigFile =
            toml::from_str(&content).map_err(|e| CaptionError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CaptionError::Config(e.to_string()))?;
        std::fs::write(path.as_ref(), content).map_err(|e| CaptionError::Config(e.to_string()))?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        let defaults = ServerConfig::default();
        Self {
            server: ServerSettings {
                host: defaults.host,
                port: defaults.port,
                cors_enabled: Some(defaults.cors_enabled),
            },
            storage: StorageSettings {
                root: defaults.storage.root,
                captions_bucket: defaults.storage.captions_bucket,
                captions_folder: Some(defaults.storage.captions_folder),
                json_folder: Some(defaults.storage.json_folder),
            },
            fetch: Some(FetchSettings {
                ytdlp_path: Some(defaults.fetch.ytdlp_path),
                subtitle_lang: Some(defaults.fetch.subtitle_lang),
                download_dir: Some(defaults.fetch.download_dir),
            }),
            logging: Some(LoggingSettings {
                level: defaults.log_level,
            }),
        }
    }

    /// Convert to ServerConfig
    pub fn into_server_config(self) -> ServerConfig {
        let storage_defaults = StorageConfig::default();
        let fetch_defaults = FetchConfig::default();
        let fetch = self.fetch.unwrap_or(FetchSettings {
            ytdlp_path: None,
            subtitle_lang: None,
            download_dir: None,
        });
        ServerConfig {
            host: self.server.host,
            port: self.server.port,
            storage: StorageConfig {
                root: self.storage.root,
                captions_bucket: self.storage.captions_bucket,
                captions_folder: self
                    .storage
                    .captions_folder
                    .unwrap_or(storage_defaults.captions_folder),
                json_folder: self
                    .storage
                    .json_folder
                    .unwrap_or(storage_defaults.json_folder),
            },
            fetch: FetchConfig {
                ytdlp_path: fetch.ytdlp_path.unwrap_or(fetch_defaults.ytdlp_path),
                subtitle_lang: fetch.subtitle_lang.unwrap_or(fetch_defaults.subtitle_lang),
                download_dir: fetch.download_dir.unwrap_or(fetch_defaults.download_dir),
            },
            cors_enabled: self.server.cors_enabled.unwrap_or(true),
            log_level: self
                .logging
                .map(|l| l.level)
                .unwrap_or_else(|| "info".to_string()),
        }
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let config = ConfigFile::default_config();
    config.to_file(path)?;
    Ok(())
}
