//! Error types for the WebSocket chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the display name (HTTP 400)
    #[error("Display name '{0}' was rejected by the server")]
    RejectedName(String),

    /// The server is at capacity (HTTP 503)
    #[error("Server is full, cannot connect as '{0}'")]
    ServerFull(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
