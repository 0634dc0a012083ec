//! Identifier factories.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use super::value_object::{ConnectionId, MessageId};

/// Generates a fresh `ConnectionId` for every accepted socket
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(Uuid::new_v4())
    }
}

/// Hands out strictly increasing message ids, starting at 1
///
/// Safe to share between connections: ids stay unique under concurrent sends.
#[derive(Debug)]
pub struct MessageIdFactory {
    next: AtomicU64,
}

impl MessageIdFactory {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn generate(&self) -> MessageId {
        MessageId::new(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for MessageIdFactory {
    fn default() -> Self {
        Self::new()
    }
}
