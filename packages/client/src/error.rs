//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured server URL cannot be turned into a WebSocket endpoint
    #[error("Invalid server URL '{0}': expected http://, https://, ws:// or wss://")]
    InvalidUrl(String),

    /// The health check endpoint did not answer successfully
    #[error("Server unavailable: {0}")]
    ServerUnavailable(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
