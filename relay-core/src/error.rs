//! Error types for the relay core.
//!
//! [`RelayError`] is the top-level error; [`HandlerError`] is used for failures inside an exchange.

use thiserror::Error;

/// Top-level error for the relay (transport, handler, IO).
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced while handling one inbound message.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The chat identifier carries no digits, so no history key can be derived from it.
    #[error("Invalid sender: {0}")]
    InvalidSender(String),

    #[error("No image in message")]
    NoImage,

    #[error("completion failed: {0}")]
    Completion(String),
}

/// Result type for core operations; uses [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;
