//! Server query handlers.

mod help;

pub use help::HelpHandler;
