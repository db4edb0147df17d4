//! Unified error handling for lineircd.
//!
//! This module provides the error hierarchy for the server side: handler
//! errors that map onto numeric replies, and reactor errors that end the
//! event loop.

use crossbeam_channel::SendError;
use lineirc_proto::{Reply, Response};
use thiserror::Error;

use crate::network::Control;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("erroneous nickname: {0}")]
    ErroneousNickname(String),

    #[error("no such nick: {0}")]
    NoSuchNick(String),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("not on channel: {0}")]
    NotOnChannel(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The session was torn down while its command was in flight.
    #[error("session gone")]
    SessionGone,

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::NicknameInUse(_) => "nickname_in_use",
            Self::ErroneousNickname(_) => "erroneous_nickname",
            Self::NoSuchNick(_) => "no_such_nick",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::NotOnChannel(_) => "not_on_channel",
            Self::UnknownCommand(_) => "unknown_command",
            Self::SessionGone => "session_gone",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Convert to an IRC error reply line.
    ///
    /// Returns `None` when there is nobody left to reply to.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, cmd_name: &str) -> Option<Reply> {
        let numeric = |code| Reply::numeric(server_name, code, nick);
        let reply = match self {
            Self::NeedMoreParams => numeric(Response::ERR_NEEDMOREPARAMS)
                .arg(cmd_name)
                .trailing("Not enough parameters"),
            Self::NicknameInUse(bad_nick) => numeric(Response::ERR_NICKNAMEINUSE)
                .arg(bad_nick.as_str())
                .trailing("Nickname is already in use"),
            Self::ErroneousNickname(bad_nick) => numeric(Response::ERR_ERRONEUSNICKNAME)
                .arg(bad_nick.as_str())
                .trailing("Erroneous nickname"),
            Self::NoSuchNick(target) => numeric(Response::ERR_NOSUCHNICK)
                .arg(target.as_str())
                .trailing("No such nick/channel"),
            Self::NoSuchChannel(chan) => numeric(Response::ERR_NOSUCHCHANNEL)
                .arg(chan.as_str())
                .trailing("No such channel"),
            Self::NotOnChannel(chan) => numeric(Response::ERR_NOTONCHANNEL)
                .arg(chan.as_str())
                .trailing("You're not on that channel"),
            Self::UnknownCommand(cmd) => numeric(Response::ERR_UNKNOWNCOMMAND)
                .arg(cmd.as_str())
                .trailing("Unknown command"),
            Self::Internal(_) => numeric(Response::ERR_UNKNOWNERROR)
                .arg(cmd_name)
                .trailing("Internal error while processing command"),

            // Nobody to tell
            Self::SessionGone => return None,
        };
        Some(reply)
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Reactor Errors (event loop)
// ============================================================================

/// Errors that stop the reactor or its control handle.
#[derive(Debug, Error)]
pub enum ReactorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("reactor is no longer running")]
    Stopped,
}

impl From<SendError<Control>> for ReactorError {
    fn from(_: SendError<Control>) -> Self {
        Self::Stopped
    }
}
