//! PART command handler.
//!
//! ## Syntax
//! ```text
//! PART <channels> [<reason>]
//! ```
//!
//! ## Behavior
//! - Can part multiple channels (comma-separated)
//! - The PART line, with the reason or "Leaving", goes to the leaver and to
//!   the remaining members
//! - User must be in channel to part it
//! - Channels left empty stay listed unless reclamation is configured

use super::super::{Context, Handler, HandlerError, HandlerResult, parse_reason};
use super::common::channel_targets;
use lineirc_proto::{Message, Reply};
use std::borrow::Cow;
use tracing::info;

/// Reason used when PART carries none.
const DEFAULT_PART_REASON: &str = "Leaving";

pub struct PartHandler;

impl Handler for PartHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // PART <channels> [reason]
        let channels_str = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let reason = parse_reason(msg.arg(1)).unwrap_or(Cow::Borrowed(DEFAULT_PART_REASON));

        let nick = ctx.nick();
        for name in channel_targets(channels_str) {
            match leave_channel(ctx, &nick, name, &reason) {
                Ok(()) => {}
                Err(HandlerError::SessionGone) => return Err(HandlerError::SessionGone),
                Err(e) => ctx.send_error(&e, "PART"),
            }
        }
        Ok(())
    }
}

fn leave_channel(ctx: &Context<'_>, nick: &str, name: &str, reason: &str) -> HandlerResult {
    let session = ctx.session()?;
    let not_on_channel = || HandlerError::NotOnChannel(name.to_string());

    if !session.lock().is_in(name) {
        return Err(not_on_channel());
    }
    let channel = ctx.matrix.channel_manager.get(name).ok_or_else(not_on_channel)?;

    channel.leave(ctx.id);
    session.lock().remove_channel(name);

    let line = Reply::from_source(nick, "PART").arg(name).trailing(reason);
    ctx.reply(&line);
    ctx.matrix.broadcast(channel.members(), &line, Some(ctx.id));

    ctx.matrix.reclaim_channel(name);

    info!(session = %ctx.id, nick = %nick, channel = %name, "User left channel");
    Ok(())
}
