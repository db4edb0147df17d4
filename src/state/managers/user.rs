//! Session and nickname registries.
//!
//! This module contains the `UserManager` struct, which owns the connection
//! registry (session id to session) and the nickname directory (nickname to
//! session id).

use crate::state::dashmap_ext::DashMapExt;
use crate::state::{Session, SessionId, SessionIdGenerator};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared handle to one session.
pub type SessionRef = Arc<Mutex<Session>>;

/// Manages connected sessions and their nicknames.
///
/// Nicknames are compared exactly (case-sensitive). A nickname maps to at
/// most one session, and the mapping is only ever removed by the session
/// that owns it.
pub struct UserManager {
    pub sessions: DashMap<SessionId, SessionRef>,
    pub nicks: DashMap<String, SessionId>,
    pub id_gen: SessionIdGenerator,
}

impl UserManager {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            nicks: DashMap::new(),
            id_gen: SessionIdGenerator::new(),
        }
    }

    pub fn insert(&self, session: Session) -> SessionRef {
        let id = session.id();
        let session = Arc::new(Mutex::new(session));
        self.sessions.insert(id, Arc::clone(&session));
        session
    }

    pub fn get(&self, id: SessionId) -> Option<SessionRef> {
        self.sessions.get_cloned(&id)
    }

    /// Remove a session from the registry. Only the first call for a given
    /// id returns `Some`.
    pub fn remove(&self, id: SessionId) -> Option<SessionRef> {
        self.sessions.remove(&id).map(|(_, session)| session)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Every registered session id, in id order.
    pub fn session_ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.sessions.iter().map(|e| *e.key()).collect();
        ids.sort_unstable();
        ids
    }

    // ========================================================================
    // Nickname directory
    // ========================================================================

    /// Atomically bind `nick` to `id`.
    ///
    /// Succeeds if the nickname is free or already bound to `id`; otherwise
    /// returns the current holder.
    pub fn claim_nick(&self, nick: &str, id: SessionId) -> Result<(), SessionId> {
        match self.nicks.entry(nick.to_string()) {
            Entry::Occupied(e) if *e.get() == id => Ok(()),
            Entry::Occupied(e) => Err(*e.get()),
            Entry::Vacant(e) => {
                e.insert(id);
                Ok(())
            }
        }
    }

    /// Unbind `nick` if, and only if, it is bound to `id`.
    pub fn release_nick(&self, nick: &str, id: SessionId) -> bool {
        self.nicks.remove_if(nick, |_, holder| *holder == id).is_some()
    }

    pub fn resolve_nick(&self, nick: &str) -> Option<SessionId> {
        self.nicks.get_cloned(nick)
    }
}

impl Default for UserManager {
    fn default() -> Self {
        Self::new()
    }
}
