//! IRC command handlers.
//!
//! This module contains the Handler trait and command registry for dispatching
//! incoming IRC messages to appropriate handlers.
//!
//! Handlers are synchronous: they run on the reactor thread, mutate shared
//! state through the [`Matrix`](crate::state::Matrix) and queue output on
//! the sessions they address. Nothing they do touches a socket.

mod channel;
mod connection;
mod core;
mod helpers;
mod messaging;
mod server_query;

#[cfg(test)]
pub(crate) mod testing;

pub use self::core::{Context, Handler, HandlerError, HandlerResult, Registry, Verb};
pub use connection::send_welcome;
pub use helpers::{parse_reason, strip_line_breaks};
