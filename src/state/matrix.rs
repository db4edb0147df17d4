//! The Matrix - Central shared state for the IRC server.
//!
//! The Matrix holds the session registry, the nickname directory and the
//! channel directory, plus two bits of reactor bookkeeping: the set of
//! sessions with freshly queued output and the queue of pending close
//! requests. Handlers only ever enqueue; the reactor drains both after each
//! readiness event.

use crate::config::Config;
use crate::state::managers::channel::ChannelManager;
use crate::state::managers::user::{SessionRef, UserManager};
use crate::state::{PLACEHOLDER_NICK, Session, SessionId};
use lineirc_proto::{LineBuffer, Reply};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::net::SocketAddr;
use tracing::{debug, info};

/// This server's identity information.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    /// Banner lines sent as NOTICEs to every new connection.
    pub welcome: Vec<String>,
}

/// The Matrix - Central shared state container.
pub struct Matrix {
    /// This server's identity.
    pub server_info: ServerInfo,

    /// Connected sessions and the nickname directory.
    pub user_manager: UserManager,

    /// Live channels.
    pub channel_manager: ChannelManager,

    /// Per-line cap handed to every new session's framer.
    max_line_bytes: Option<usize>,

    /// Whether channels are dropped once their last member leaves.
    reclaim_empty_channels: bool,

    /// Sessions with output queued since the last flush.
    dirty: Mutex<BTreeSet<SessionId>>,

    /// Sessions the reactor should tear down, with the reason to log.
    close_requests: Mutex<Vec<(SessionId, String)>>,
}

impl Matrix {
    pub fn new(config: &Config) -> Self {
        Self {
            server_info: ServerInfo {
                name: config.server.name.clone(),
                welcome: config.server.welcome.clone(),
            },
            user_manager: UserManager::new(),
            channel_manager: ChannelManager::new(),
            max_line_bytes: config.limits.line_cap(),
            reclaim_empty_channels: config.limits.reclaim_empty_channels,
            dirty: Mutex::new(BTreeSet::new()),
            close_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn server_name(&self) -> &str {
        &self.server_info.name
    }

    /// Register a new session under a fresh id.
    pub fn open_session(&self, addr: Option<SocketAddr>) -> (SessionId, SessionRef) {
        let id = self.user_manager.id_gen.next();
        let inbound = match self.max_line_bytes {
            Some(limit) => LineBuffer::with_max_len(limit),
            None => LineBuffer::new(),
        };
        let session = self.user_manager.insert(Session::new(id, addr, inbound));
        debug!(session = %id, "Session registered");
        (id, session)
    }

    /// Current nickname of a session, or the placeholder.
    pub fn nick_of(&self, id: SessionId) -> String {
        self.user_manager
            .get(id)
            .map(|s| s.lock().nick().to_string())
            .unwrap_or_else(|| PLACEHOLDER_NICK.to_string())
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Queue a line for one session. Returns false if the session is gone.
    pub fn send_to(&self, id: SessionId, line: &impl Display) -> bool {
        let Some(session) = self.user_manager.get(id) else {
            return false;
        };
        session.lock().send(line);
        self.dirty.lock().insert(id);
        true
    }

    /// Queue a line for every recipient except `except`.
    ///
    /// Returns the number of sessions the line was queued for.
    pub fn broadcast(
        &self,
        recipients: impl IntoIterator<Item = SessionId>,
        line: &Reply,
        except: Option<SessionId>,
    ) -> usize {
        let text = line.to_string();
        recipients
            .into_iter()
            .filter(|id| Some(*id) != except)
            .filter(|id| self.send_to(*id, &text))
            .count()
    }

    /// Every session that shares at least one channel with `id`, excluding
    /// `id` itself. Each peer appears once.
    pub fn peers_of(&self, id: SessionId) -> BTreeSet<SessionId> {
        let Some(session) = self.user_manager.get(id) else {
            return BTreeSet::new();
        };
        let channels = session.lock().channels();

        let mut peers = BTreeSet::new();
        for name in channels {
            if let Some(channel) = self.channel_manager.get(&name) {
                peers.extend(channel.members());
            }
        }
        peers.remove(&id);
        peers
    }

    /// Sessions with output queued since the last call.
    pub fn take_dirty(&self) -> Vec<SessionId> {
        std::mem::take(&mut *self.dirty.lock()).into_iter().collect()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Ask the reactor to close a session after the current event.
    ///
    /// The session stops processing further input immediately.
    pub fn request_close(&self, id: SessionId, reason: impl Into<String>) {
        if let Some(session) = self.user_manager.get(id) {
            session.lock().mark_closing();
        }
        self.close_requests.lock().push((id, reason.into()));
    }

    pub fn take_close_requests(&self) -> Vec<(SessionId, String)> {
        std::mem::take(&mut *self.close_requests.lock())
    }

    /// Drop `name` from the directory if it is empty and reclamation is
    /// enabled. Otherwise the channel stays, with zero members.
    pub fn reclaim_channel(&self, name: &str) {
        if self.reclaim_empty_channels && self.channel_manager.reclaim_if_empty(name) {
            let remaining = self.channel_manager.channels.len();
            debug!(channel = %name, remaining, "Channel reclaimed");
        }
    }

    /// Remove every trace of a session from shared state.
    ///
    /// Releases the nickname (only if this session still owns it), removes
    /// the session from each joined channel, announces a PART to remaining
    /// members unless a QUIT already went out, and reclaims channels left
    /// empty when configured to. Idempotent: only the first call returns the session.
    pub fn disconnect(&self, id: SessionId, reason: &str) -> Option<SessionRef> {
        let session = self.user_manager.remove(id)?;
        self.dirty.lock().remove(&id);

        let (nick, named, addr, channels, announced) = {
            let s = session.lock();
            (s.nick().to_string(), s.has_nick(), s.addr(), s.channels(), s.quit_announced())
        };

        if named {
            self.user_manager.release_nick(&nick, id);
        }

        for name in &channels {
            session.lock().remove_channel(name);
            let Some(channel) = self.channel_manager.get(name) else {
                continue;
            };
            channel.leave(id);
            if !announced {
                let line = Reply::from_source(nick.as_str(), "PART")
                    .arg(name.as_str())
                    .trailing(reason);
                self.broadcast(channel.members(), &line, None);
            }
            self.reclaim_channel(name);
        }

        info!(
            session = %id,
            nick = %nick,
            addr = ?addr,
            channels = channels.len(),
            sessions = self.user_manager.session_count(),
            reason = %reason,
            "Session removed"
        );
        Some(session)
    }
}
