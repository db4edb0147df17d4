//! State management module.
//!
//! Contains the Matrix (shared server state) and related entities.

mod channel;
pub mod dashmap_ext;
mod id;
pub mod managers;
mod matrix;
mod session;

pub use channel::Channel;
pub use id::{FIRST_SESSION_ID, SessionId, SessionIdGenerator};
pub use managers::user::SessionRef;
pub use matrix::Matrix;
pub use session::{PLACEHOLDER_NICK, Session};
