//! Client-side state and reconnection rules.
//!
//! Everything here is pure: the session feeds server events in and reads the
//! resulting view back out.

use std::{collections::BTreeSet, time::Duration};

use kaiwa_shared::protocol::{ClientEvent, ServerEvent};
use tokio::time::Instant;

use crate::error::ClientError;

/// Display names of the participants currently typing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypingState {
    users: BTreeSet<String>,
}

impl TypingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the user on `true`, remove it on `false`.
    pub fn set(&mut self, user: &str, is_typing: bool) {
        if is_typing {
            self.users.insert(user.to_string());
        } else {
            self.users.remove(user);
        }
    }

    pub fn remove(&mut self, user: &str) {
        self.users.remove(user);
    }

    pub fn contains(&self, user: &str) -> bool {
        self.users.contains(user)
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Names in alphabetical order
    pub fn names(&self) -> Vec<&str> {
        self.users.iter().map(String::as_str).collect()
    }
}

/// What the client currently knows about the room
#[derive(Debug, Clone)]
pub struct ChatView {
    me: String,
    users: Vec<String>,
    typing: TypingState,
}

impl ChatView {
    pub fn new(me: impl Into<String>) -> Self {
        Self {
            me: me.into(),
            users: Vec::new(),
            typing: TypingState::new(),
        }
    }

    pub fn me(&self) -> &str {
        &self.me
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn typing(&self) -> &TypingState {
        &self.typing
    }

    /// Apply one server event to the view.
    ///
    /// The user list is replaced wholesale on every presence event. A user
    /// who left is dropped from the typing set once no participant with that
    /// name remains.
    pub fn apply(&mut self, event: &ServerEvent) {
        match event {
            ServerEvent::UserJoined(payload) => {
                self.users = payload.users.clone();
            }
            ServerEvent::UserLeft(payload) => {
                self.users = payload.users.clone();
                if !self.users.contains(&payload.user) {
                    self.typing.remove(&payload.user);
                }
            }
            ServerEvent::UserTyping(payload) => {
                self.typing.set(&payload.user, payload.is_typing);
            }
            ServerEvent::Message(_) | ServerEvent::Error(_) => {}
        }
    }
}

/// Command typed at the prompt that announces typing
pub const TYPING_COMMAND: &str = "/typing";

/// Seconds without a new `/typing` after which `typing(false)` is sent
pub const TYPING_IDLE_TIMEOUT_SECS: u64 = 5;

/// What a line read from the prompt asks the session to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Send the line as a chat message
    Message(String),
    /// Tell the others that we are typing
    StartTyping,
}

/// Interpret one line read from the prompt.
///
/// Returns `None` for blank lines. Only the exact `/typing` command is
/// special; any other text, including other slash-prefixed text, is sent
/// unchanged as a message.
pub fn parse_input(line: &str) -> Option<InputCommand> {
    if line.trim().is_empty() {
        return None;
    }
    if line.trim() == TYPING_COMMAND {
        return Some(InputCommand::StartTyping);
    }
    Some(InputCommand::Message(line.to_string()))
}

/// Our own typing indicator, as announced to the server
///
/// `start` arms an idle deadline; the session sends `typing(false)` when it
/// passes or right before the next message.
#[derive(Debug, Clone, Default)]
pub struct TypingIndicator {
    deadline: Option<Instant>,
}

impl TypingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announce typing and push the idle deadline out to `now + idle_timeout`.
    pub fn start(&mut self, now: Instant, idle_timeout: Duration) -> ClientEvent {
        self.deadline = Some(now + idle_timeout);
        ClientEvent::Typing(true)
    }

    /// Event to send before a chat message, if typing was announced
    pub fn before_message(&mut self) -> Option<ClientEvent> {
        self.deadline.take().map(|_| ClientEvent::Typing(false))
    }

    /// Event to send once the idle deadline has passed
    pub fn expire(&mut self, now: Instant) -> Option<ClientEvent> {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                Some(ClientEvent::Typing(false))
            }
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// Check if the client should exit immediately based on the error type.
///
/// A malformed server URL will not fix itself on retry.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::InvalidUrl(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}
