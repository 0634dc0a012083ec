//! Message formatting utilities for client display.

use chrono::{DateTime, SecondsFormat, Utc};
use kaiwa_shared::protocol::{
    ChatMessagePayload, ErrorCode, ErrorPayload, PresencePayload, ServerEvent,
};

use crate::domain::{ChatView, TypingState};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Render a server event against the view it was just applied to.
    ///
    /// Returns `None` when there is nothing worth printing.
    pub fn format_event(event: &ServerEvent, view: &ChatView) -> Option<String> {
        match event {
            ServerEvent::UserJoined(payload) => {
                Some(Self::format_user_joined(payload, view.me()))
            }
            ServerEvent::UserLeft(payload) => Some(Self::format_user_left(payload)),
            ServerEvent::UserTyping(_) => Self::format_typing(view.typing()),
            ServerEvent::Message(payload) => Some(Self::format_chat_message(payload, view.me())),
            ServerEvent::Error(payload) => Some(Self::format_error(payload)),
        }
    }

    /// Format a `userJoined` notification with the current user list
    pub fn format_user_joined(payload: &PresencePayload, me: &str) -> String {
        let who = if payload.user == me {
            format!("{} (me)", payload.user)
        } else {
            payload.user.clone()
        };
        format!(
            "\n+ {} joined the chat\n{}",
            who,
            Self::format_user_list(&payload.users)
        )
    }

    /// Format a `userLeft` notification with the remaining user list
    pub fn format_user_left(payload: &PresencePayload) -> String {
        format!(
            "\n- {} left the chat\n{}",
            payload.user,
            Self::format_user_list(&payload.users)
        )
    }

    pub fn format_user_list(users: &[String]) -> String {
        if users.is_empty() {
            "  online (0): nobody\n".to_string()
        } else {
            format!("  online ({}): {}\n", users.len(), users.join(", "))
        }
    }

    /// Format a chat message
    ///
    /// The time of day is shown in UTC. An unparseable timestamp is printed
    /// as received.
    pub fn format_chat_message(payload: &ChatMessagePayload, me: &str) -> String {
        let me_suffix = if payload.user == me { " (me)" } else { "" };
        format!(
            "\n[{}] #{} @{}{}: {}\n",
            Self::format_time_of_day(&payload.timestamp),
            payload.id,
            payload.user,
            me_suffix,
            payload.text
        )
    }

    /// Format the typing summary, or `None` when nobody is typing
    pub fn format_typing(typing: &TypingState) -> Option<String> {
        let names = typing.names();
        let line = match names.as_slice() {
            [] => return None,
            [one] => format!("{} is typing...", one),
            [init @ .., last] => format!("{} and {} are typing...", init.join(", "), last),
        };
        Some(format!("\n* {}\n", line))
    }

    /// Format an error reported by the server
    pub fn format_error(payload: &ErrorPayload) -> String {
        let code = match payload.code {
            ErrorCode::NotJoined => "not joined",
            ErrorCode::InvalidPayload => "invalid payload",
        };
        format!("\n! {}: {}\n", code, payload.message)
    }

    /// Format a frame that is not a known server event
    pub fn format_raw_message(text: &str) -> String {
        format!("\n? {}\n", text)
    }

    /// Format a binary frame notice
    pub fn format_binary_message(len: usize) -> String {
        format!("\n? binary frame ({} bytes)\n", len)
    }

    fn format_time_of_day(timestamp: &str) -> String {
        match DateTime::parse_from_rfc3339(timestamp) {
            Ok(dt) => dt.with_timezone(&Utc).format("%H:%M:%S").to_string(),
            Err(_) => timestamp.to_string(),
        }
    }

    /// Format the moment the client (re)connected
    pub fn format_connected(now: DateTime<Utc>) -> String {
        format!(
            "\nConnected at {}\n",
            now.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }
}
