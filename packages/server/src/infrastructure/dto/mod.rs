//! Data Transfer Objects (DTOs) for the chat relay.
//!
//! The wire DTOs themselves live in `kaiwa_shared::protocol` so the client can
//! use them too; this module holds the domain → DTO conversions.

pub mod conversion;

pub use kaiwa_shared::protocol as websocket;
