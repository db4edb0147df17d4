//! Core handler infrastructure.
//!
//! This module contains the fundamental types for the command handler
//! system: the handler context, the verb table and the registry that
//! dispatches parsed messages.

pub mod context;
pub mod registry;
pub mod verb;

// Re-export commonly used types
pub use context::{Context, Handler, HandlerError, HandlerResult};
pub use registry::Registry;
pub use verb::Verb;
