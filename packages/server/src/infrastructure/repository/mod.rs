//! Participant Registry implementations.

pub mod inmemory;

pub use inmemory::InMemoryParticipantRegistry;
