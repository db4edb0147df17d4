//! Network module.
//!
//! Contains the Reactor (listener plus readiness loop) and the per-socket
//! Connection it drives.

mod connection;
mod reactor;

pub use reactor::{Control, Reactor};
