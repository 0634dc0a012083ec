//! Kaiwa chat relay server library.
//!
//! Tracks connected participants and fans out join/leave, message and typing
//! events to them over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
