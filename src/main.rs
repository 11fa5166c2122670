//! Caption Server
//!
//! A Rust-based service that fetches YouTube caption tracks via yt-dlp,
//! converts WebVTT files into JSON caption records, and stages both into
//! object storage.

mod config;
mod config_file;
mod convert;
mod error;
mod fetch;
mod http;
mod job;
mod state;
mod storage;
mod subtitle;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::error::{CaptionError, Result};
use crate::http::create_router;
use crate::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "caption-server";

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so its log level can seed the subscriber;
    // load problems are reported once logging is up
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let (config, config_warning) = load_config(&config_path);

    // Initialize logging
    init_logging(&config.log_level);

    tracing::info!("{} v{} starting", APP_NAME, VERSION);
    if let Some(warning) = config_warning {
        tracing::warn!("{}", warning);
    }
    tracing::info!("Configuration loaded: {:?}", config);

    // Create application state with the storage and fetcher capabilities
    let state = Arc::new(AppState::from_config(config.clone()));

    // Build router
    let app = create_router(state.clone());

    // Start server
    let addr: SocketAddr = config
        .socket_addr()
        .parse()
        .map_err(|e| CaptionError::Config(format!("invalid listen address: {e}")))?;
    tracing::info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| CaptionError::Config(format!("failed to bind {addr}: {e}")))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| CaptionError::Config(e.to_string()))?;

    Ok(())
}

/// Load the configuration file, falling back to defaults. Returns the
/// config and any warning to emit once logging is initialized.
fn load_config(config_path: &str) -> (ServerConfig, Option<String>) {
    if !std::path::Path::new(config_path).exists() {
        return (ServerConfig::default(), None);
    }
    match crate::config_file::ConfigFile::from_file(config_path) {
        Ok(cf) => (cf.into_server_config(), None),
        Err(e) => (
            ServerConfig::default(),
            Some(format!(
                "Failed to load config file {config_path}: {e}. Using defaults."
            )),
        ),
    }
}

/// Initialize logging with tracing; the configured level is the fallback
/// when RUST_LOG is unset
fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_env_filter(level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_env_filter(level: &str) -> String {
    format!("caption_server={level},tower_http={level}")
}
