//! Server endpoint resolution from the configured base URL.

use crate::error::ClientError;

/// Endpoints derived from the server base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// HTTP health check URL
    pub health_url: String,
    /// WebSocket URL
    pub websocket_url: String,
}

impl Endpoints {
    /// Resolve the endpoints from a base URL such as `http://127.0.0.1:3002`.
    ///
    /// `ws://` / `wss://` base URLs are accepted too. A trailing `/` or `/ws`
    /// is ignored.
    pub fn from_base_url(base_url: &str) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let trimmed = trimmed.strip_suffix("/ws").unwrap_or(trimmed);

        let (http_scheme, ws_scheme, rest) = if let Some(rest) = trimmed.strip_prefix("http://") {
            ("http", "ws", rest)
        } else if let Some(rest) = trimmed.strip_prefix("https://") {
            ("https", "wss", rest)
        } else if let Some(rest) = trimmed.strip_prefix("ws://") {
            ("http", "ws", rest)
        } else if let Some(rest) = trimmed.strip_prefix("wss://") {
            ("https", "wss", rest)
        } else {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        };

        if rest.is_empty() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            health_url: format!("{}://{}/", http_scheme, rest),
            websocket_url: format!("{}://{}/ws", ws_scheme, rest),
        })
    }
}
