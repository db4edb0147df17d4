//! Domain managers for server state.
//!
//! Each manager owns one slice of the server's state so the Matrix itself
//! stays a thin coordinator.

pub mod channel;
pub mod user;
