//! Domain entities.

use super::value_object::{ConnectionId, DisplayName, MessageId, MessageText, Timestamp};

/// A connection that has completed `join`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub display_name: DisplayName,
}

impl Participant {
    pub fn new(connection_id: ConnectionId, display_name: DisplayName) -> Self {
        Self {
            connection_id,
            display_name,
        }
    }
}

/// A chat message, created for a single broadcast and never stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub author: DisplayName,
    pub text: MessageText,
    pub sent_at: Timestamp,
}

impl ChatMessage {
    pub fn new(id: MessageId, author: DisplayName, text: MessageText, sent_at: Timestamp) -> Self {
        Self {
            id,
            author,
            text,
            sent_at,
        }
    }
}
