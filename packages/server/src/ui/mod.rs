//! UI layer: HTTP and WebSocket surface of the chat relay.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{Server, with_http_layers};
