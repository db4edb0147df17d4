//! Session identifiers.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Opaque identifier for one client connection.
///
/// The raw value doubles as the connection's readiness token, so an id is
/// never handed out twice during a process lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(usize);

impl SessionId {
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out monotonically increasing session ids.
///
/// Note: Counter starts at 2 because 0 and 1 are reserved for the listening
/// socket and the control waker.
pub struct SessionIdGenerator {
    counter: AtomicUsize,
}

/// First id available to client sessions.
pub const FIRST_SESSION_ID: usize = 2;

impl SessionIdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicUsize::new(FIRST_SESSION_ID),
        }
    }

    /// Generate the next unique id.
    pub fn next(&self) -> SessionId {
        SessionId::new(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SessionIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
