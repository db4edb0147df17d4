//! Channel-related command handlers.
//!
//! Handles JOIN, PART and LIST.

mod common;
mod join;
mod list;
mod part;

pub use join::JoinHandler;
pub use list::ListHandler;
pub use part::PartHandler;
