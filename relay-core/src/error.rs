//! Error types for the relay core.
//!
//! [`RelayError`] is the top-level error shared by sessions and handlers.

use thiserror::Error;

/// Top-level error for the relay (session transport, remote chat API, IO).
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Session error: {0}")]
    Session(String),

    #[error("Chat API error: {0}")]
    ChatApi(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Result type for core operations; uses [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;
