use std::time::Duration;
use thiserror::Error;

/// All errors produced by the chatwatch dashboard.
#[derive(Error, Debug)]
pub enum WatchError {
    /// No stream identifier could be extracted from the user's input.
    #[error("Could not extract video ID from input.")]
    InvalidInput,

    /// The backend answered the start request with `ok: false`.
    #[error("{0}")]
    BackendRejected(String),

    /// The backend did not answer within the configured request timeout.
    #[error("Backend request timed out after {0:?}")]
    RequestTimeout(Duration),

    /// An HTTP request could not be sent or its response could not be read.
    #[error("Backend request failed: {0}")]
    Http(String),

    /// A WebSocket-level failure (connect, read, or close).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the chatwatch crates.
pub type Result<T> = std::result::Result<T, WatchError>;
