//! Wire protocol shared by the server and the client.
//!
//! Every WebSocket text frame carries exactly one JSON object of the form
//! `{"event": <name>, "data": <payload>}`.
//!
//! ```text
//! client -> server   join | message | typing
//! server -> client   userJoined | userLeft | userTyping | message | error
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Frame encoding / decoding errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame is not valid JSON or does not match any known event
    #[error("invalid frame: {0}")]
    InvalidFrame(#[from] serde_json::Error),
}

/// Events sent from a client to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Join the room with the given display name
    Join(String),
    /// Send a chat message
    Message(MessagePayload),
    /// Start / stop typing
    Typing(bool),
}

impl ClientEvent {
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(frame)?)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Payload of a client `message` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub text: String,
}

/// Events sent from the server to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    UserJoined(PresencePayload),
    UserLeft(PresencePayload),
    UserTyping(TypingPayload),
    Message(ChatMessagePayload),
    /// Sent only to the connection whose event was rejected
    Error(ErrorPayload),
}

impl ServerEvent {
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(frame)?)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Payload of `userJoined` / `userLeft`
///
/// `users` is the complete list of display names after the change, so clients
/// replace their view instead of applying a delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresencePayload {
    pub user: String,
    pub users: Vec<String>,
}

/// Payload of `userTyping`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingPayload {
    pub user: String,
    pub is_typing: bool,
}

/// Payload of a server `message` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessagePayload {
    pub id: u64,
    pub text: String,
    pub user: String,
    /// RFC 3339 UTC, e.g. `2024-01-01T00:00:00.000Z`
    pub timestamp: String,
}

/// Reason an event was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    /// `message` or `typing` sent before `join`
    NotJoined,
    /// Unparseable frame or a payload failing validation
    InvalidPayload,
}

/// Payload of `error`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: ErrorCode,
    pub message: String,
}
