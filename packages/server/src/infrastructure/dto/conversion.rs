//! Conversion logic from domain entities to wire DTOs.

use kaiwa_shared::time::timestamp_to_rfc3339;

use crate::domain::{DisplayName, entity};
use crate::infrastructure::dto::websocket as dto;

impl From<entity::ChatMessage> for dto::ChatMessagePayload {
    fn from(model: entity::ChatMessage) -> Self {
        Self {
            id: model.id.value(),
            text: model.text.into_string(),
            user: model.author.into_string(),
            timestamp: timestamp_to_rfc3339(model.sent_at.value()),
        }
    }
}

/// Build a `userJoined` / `userLeft` payload from the acting user and the
/// registry snapshot.
pub fn presence_payload(user: &DisplayName, users: Vec<DisplayName>) -> dto::PresencePayload {
    dto::PresencePayload {
        user: user.as_str().to_string(),
        users: users.into_iter().map(DisplayName::into_string).collect(),
    }
}
