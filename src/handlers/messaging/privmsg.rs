//! PRIVMSG command handler.
//!
//! ## Syntax
//! ```text
//! PRIVMSG <target> :<text>
//! ```
//!
//! A target starting with `#` is a channel: the line goes to every member
//! except the sender, and the sender does not need to be a member. Any
//! other target is a nickname.

use super::super::{Context, Handler, HandlerError, HandlerResult, strip_line_breaks};
use lineirc_proto::{ChannelExt, Message, Reply};
use tracing::debug;

pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let (Some(target), Some(text)) = (msg.arg(0), msg.arg(1)) else {
            debug!(session = %ctx.id, args = msg.arg_count(), "PRIVMSG with missing arguments ignored");
            return Ok(());
        };

        let nick = ctx.nick();
        let line = Reply::from_source(nick.as_str(), "PRIVMSG")
            .arg(target)
            .trailing(strip_line_breaks(text));

        if target.is_channel_target() {
            let channel = ctx
                .matrix
                .channel_manager
                .get(target)
                .ok_or_else(|| HandlerError::NoSuchChannel(target.to_string()))?;
            let delivered = ctx.matrix.broadcast(channel.members(), &line, Some(ctx.id));
            debug!(from = %nick, channel = %target, delivered, "Channel message relayed");
        } else {
            let recipient = ctx
                .matrix
                .user_manager
                .resolve_nick(target)
                .ok_or_else(|| HandlerError::NoSuchNick(target.to_string()))?;
            if !ctx.matrix.send_to(recipient, &line) {
                return Err(HandlerError::NoSuchNick(target.to_string()));
            }
            debug!(from = %nick, to = %target, "Private message relayed");
        }

        Ok(())
    }
}
