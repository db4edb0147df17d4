//! Command handler context and core types.
//!
//! Defines the `Context` struct passed to all handlers and the `Handler`
//! trait they implement.

use crate::state::{Matrix, SessionId, SessionRef};
use lineirc_proto::Message;
use std::fmt::Display;

pub use crate::error::{HandlerError, HandlerResult};

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The session that sent the command.
    pub id: SessionId,
    /// Shared server state.
    pub matrix: &'a Matrix,
}

impl<'a> Context<'a> {
    pub fn new(id: SessionId, matrix: &'a Matrix) -> Self {
        Self { id, matrix }
    }

    pub fn server_name(&self) -> &str {
        self.matrix.server_name()
    }

    /// The sender's session, or [`HandlerError::SessionGone`].
    pub fn session(&self) -> Result<SessionRef, HandlerError> {
        self.matrix
            .user_manager
            .get(self.id)
            .ok_or(HandlerError::SessionGone)
    }

    /// The sender's current nickname (`*` until one is chosen).
    pub fn nick(&self) -> String {
        self.matrix.nick_of(self.id)
    }

    /// Queue a line back to the sender.
    pub fn reply(&self, line: &impl Display) {
        self.matrix.send_to(self.id, line);
    }

    /// Report a handler error to the sender without aborting the command.
    ///
    /// Used by multi-target commands that keep going after a per-target
    /// failure.
    pub fn send_error(&self, err: &HandlerError, cmd_name: &str) {
        if let Some(reply) = err.to_irc_reply(self.server_name(), &self.nick(), cmd_name) {
            self.reply(&reply);
        }
    }

    /// Ask the reactor to close this session once the event is processed.
    pub fn request_close(&self, reason: impl Into<String>) {
        self.matrix.request_close(self.id, reason);
    }
}

/// A command handler.
///
/// Handlers run to completion on the reactor thread and must not block.
/// Output is queued through the [`Context`]; the reactor flushes it after
/// the current event.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult;
}
