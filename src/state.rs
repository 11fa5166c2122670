//! Application state management
//!
//! This module defines the AppState structure that holds:
//! - Server configuration
//! - The object store handle
//! - The caption fetcher capability
//!
//! Both capabilities are constructed once at startup and injected here;
//! nothing reaches for a module-level singleton.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::fetch::{SubtitleFetcher, YtDlpFetcher};
use crate::storage::{FsObjectStore, ObjectStore};

/// Shared application state
pub struct AppState {
    /// Server configuration (read-only after startup)
    pub config: ServerConfig,

    /// Object store handle
    pub store: Arc<dyn ObjectStore>,

    /// Caption fetcher capability
    pub fetcher: Arc<dyn SubtitleFetcher>,
}

impl AppState {
    /// Create state with explicit capabilities (used by tests)
    pub fn new(
        config: ServerConfig,
        store: Arc<dyn ObjectStore>,
        fetcher: Arc<dyn SubtitleFetcher>,
    ) -> Self {
        Self {
            config,
            store,
            fetcher,
        }
    }

    /// Create state with the default production capabilities derived from
    /// the configuration
    pub fn from_config(config: ServerConfig) -> Self {
        let store = Arc::new(FsObjectStore::new(config.storage.root.clone()));
        let fetcher = Arc::new(YtDlpFetcher::new(
            config.fetch.ytdlp_path.clone(),
            config.fetch.subtitle_lang.clone(),
        ));
        Self::new(config, store, fetcher)
    }
}
