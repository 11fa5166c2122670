use thiserror::Error;

/// Main error type for the caption server
#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Malformed subtitle input: {0}")]
    MalformedInput(String),

    #[error("Unsupported video URL: {0}")]
    UnsupportedUrl(String),

    #[error("Caption fetch failed: {0}")]
    FetchFailed(String),

    #[error("Object not found in storage: {bucket}/{key}")]
    RemoteNotFound { bucket: String, key: String },

    #[error("Storage error: {0}")]
    RemoteError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("Failed to write local file: {0}")]
    LocalWriteError(String),

    #[error("Local file not found: {0}")]
    LocalNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CaptionError {
    /// Whether this error was caused by bad caller input rather than a
    /// processing failure. Drives the HTTP status mapping.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CaptionError::UnsupportedUrl(_))
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CaptionError>;
