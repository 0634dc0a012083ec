//! Request handlers.

mod http;
mod websocket;

pub use http::{handle_panic, health_check};
pub use websocket::websocket_handler;
