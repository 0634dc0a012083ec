//! Kaiwa terminal chat client.
//!
//! A thin presentation layer: it joins the room, sends typed lines as chat
//! messages and renders whatever the server broadcasts.

pub mod config;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;
mod ui;

pub use runner::run_client;
