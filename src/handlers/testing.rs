//! In-process harness for handler tests.
//!
//! Drives the registry directly against a [`Matrix`], with no sockets
//! involved, and reads back whatever each session has queued.

use super::{Context, HandlerResult, Registry};
use crate::config::Config;
use crate::state::{Matrix, SessionId};
use lineirc_proto::Message;

pub struct Harness {
    pub matrix: Matrix,
    pub registry: Registry,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Build a harness around `config`, with the server name forced to
    /// `irc.test`.
    pub fn with_config(mut config: Config) -> Self {
        config.server.name = "irc.test".to_string();
        Self {
            matrix: Matrix::new(&config),
            registry: Registry::new(),
        }
    }

    /// Register a session with no nickname.
    pub fn connect(&mut self) -> SessionId {
        self.matrix.open_session(None).0
    }

    /// Register a session and give it a nickname, discarding the echo.
    pub fn connect_as(&mut self, nick: &str) -> SessionId {
        let id = self.connect();
        self.send(id, &format!("NICK {nick}"))
            .expect("nickname should be free");
        self.lines(id);
        id
    }

    /// Parse and dispatch one line as if `id` had sent it.
    pub fn send(&mut self, id: SessionId, line: &str) -> HandlerResult {
        let msg = Message::parse(line).expect("test line should parse");
        let mut ctx = Context::new(id, &self.matrix);
        self.registry.dispatch(&mut ctx, &msg)
    }

    /// Lines queued for `id` since the last call.
    pub fn lines(&self, id: SessionId) -> Vec<String> {
        self.matrix
            .user_manager
            .get(id)
            .map(|s| s.lock().take_lines())
            .unwrap_or_default()
    }

    /// Discard everything queued for every session.
    pub fn drain_all(&self) {
        for id in self.matrix.user_manager.session_ids() {
            self.lines(id);
        }
        self.matrix.take_dirty();
    }
}
