//! Domain layer for the chat relay.
//!
//! This module contains business rules that are independent of the wire
//! protocol and of the WebSocket transport.

pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, Participant};
pub use error::ValueObjectError;
pub use factory::{ConnectionIdFactory, MessageIdFactory};
pub use message_pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use repository::ParticipantRegistry;
pub use value_object::{ConnectionId, DisplayName, MessageId, MessageText, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
