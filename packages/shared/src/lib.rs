//! Shared library for Kaiwa server and client.
//!
//! Wire protocol, time utilities and logger setup used by both binaries.

pub mod logger;
pub mod protocol;
pub mod time;
