//! NICK command handler.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use crate::state::PLACEHOLDER_NICK;
use lineirc_proto::{CHANNEL_SIGIL, Message, Reply};
use tracing::{debug, info};

/// Validates a nickname.
///
/// Anything goes except the placeholder itself, a leading channel sigil or
/// colon, and characters that would break line framing or target lists.
fn is_valid_nick(nick: &str) -> bool {
    if nick.is_empty() || nick == PLACEHOLDER_NICK {
        return false;
    }
    if nick.starts_with(CHANNEL_SIGIL) || nick.starts_with(':') {
        return false;
    }
    !nick
        .chars()
        .any(|c| c == ',' || c.is_whitespace() || c.is_control())
}

/// Handler for NICK command.
///
/// `NICK <nickname>` claims the name atomically, releases the previous one
/// and announces the change to the sender and to everyone sharing a channel
/// with them, each exactly once. A missing parameter is ignored.
pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let Some(new_nick) = msg.arg(0) else {
            debug!(session = %ctx.id, "NICK without parameter ignored");
            return Ok(());
        };

        if !is_valid_nick(new_nick) {
            return Err(HandlerError::ErroneousNickname(new_nick.to_string()));
        }

        let session = ctx.session()?;
        if session.lock().nick() == new_nick {
            return Ok(());
        }

        ctx.matrix
            .user_manager
            .claim_nick(new_nick, ctx.id)
            .map_err(|_| HandlerError::NicknameInUse(new_nick.to_string()))?;

        let old_nick = session.lock().set_nick(new_nick);
        if old_nick != PLACEHOLDER_NICK {
            ctx.matrix.user_manager.release_nick(&old_nick, ctx.id);
        }

        let line = Reply::from_source(old_nick.as_str(), "NICK").trailing(new_nick);
        ctx.reply(&line);
        let peers = ctx.matrix.peers_of(ctx.id);
        ctx.matrix.broadcast(peers, &line, Some(ctx.id));

        info!(session = %ctx.id, old = %old_nick, new = %new_nick, "Nick changed");
        Ok(())
    }
}
