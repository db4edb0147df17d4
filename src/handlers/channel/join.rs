//! JOIN command handler.
//!
//! ## Syntax
//! ```text
//! JOIN <channel>[,<channel>...]
//! ```
//!
//! ## Behavior
//! - Creates the channel on first join
//! - Broadcasts the JOIN to every member, the joiner included
//! - Joining a channel you are already in does nothing
//! - Names without the `#` sigil get ERR_NOSUCHCHANNEL; the rest of the
//!   list is still processed

use super::super::{Context, Handler, HandlerError, HandlerResult};
use super::common::channel_targets;
use lineirc_proto::{ChannelExt, Message, Reply};
use tracing::{debug, info};

pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let Some(channels_str) = msg.arg(0) else {
            debug!(session = %ctx.id, "JOIN without parameter ignored");
            return Ok(());
        };

        let nick = ctx.nick();
        for name in channel_targets(channels_str) {
            match join_channel(ctx, &nick, name) {
                Ok(()) => {}
                Err(HandlerError::SessionGone) => return Err(HandlerError::SessionGone),
                Err(e) => ctx.send_error(&e, "JOIN"),
            }
        }
        Ok(())
    }
}

fn join_channel(ctx: &Context<'_>, nick: &str, name: &str) -> HandlerResult {
    if !name.is_channel_name() {
        return Err(HandlerError::NoSuchChannel(name.to_string()));
    }

    let session = ctx.session()?;
    let channel = ctx.matrix.channel_manager.get_or_create(name);
    if !channel.join(ctx.id) {
        return Ok(());
    }
    session.lock().add_channel(name);

    let line = Reply::from_source(nick, "JOIN").arg(name);
    ctx.matrix.broadcast(channel.members(), &line, None);

    info!(session = %ctx.id, nick = %nick, channel = %name, members = channel.member_count(), "User joined channel");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::Harness;

    #[test]
    fn test_join_creates_and_echoes() {
        let mut h = Harness::new();
        let a = h.connect_as("alice");
        h.send(a, "JOIN #lobby").unwrap();
        assert_eq!(h.lines(a), vec![":alice JOIN #lobby"]);

        let chan = h.matrix.channel_manager.get("#lobby").unwrap();
        assert_eq!(chan.members(), vec![a]);
        let session = h.matrix.user_manager.get(a).unwrap();
        assert!(session.lock().is_in("#lobby"));
    }

    #[test]
    fn test_join_broadcasts_to_members() {
        let mut h = Harness::new();
        let a = h.connect_as("alice");
        let b = h.connect_as("bob");
        h.send(a, "JOIN #lobby").unwrap();
        h.drain_all();

        h.send(b, "JOIN #lobby").unwrap();
        assert_eq!(h.lines(a), vec![":bob JOIN #lobby"]);
        assert_eq!(h.lines(b), vec![":bob JOIN #lobby"]);
    }

    #[test]
    fn test_rejoin_is_noop() {
        let mut h = Harness::new();
        let a = h.connect_as("alice");
        h.send(a, "JOIN #lobby").unwrap();
        h.drain_all();
        h.send(a, "JOIN #lobby").unwrap();
        assert!(h.lines(a).is_empty());
        assert_eq!(h.matrix.channel_manager.get("#lobby").unwrap().member_count(), 1);
    }

    #[test]
    fn test_join_list_with_bad_name() {
        let mut h = Harness::new();
        let a = h.connect_as("alice");
        h.send(a, "JOIN #a,b,#c").unwrap();
        assert_eq!(
            h.lines(a),
            vec![
                ":alice JOIN #a",
                ":irc.test 403 alice b :No such channel",
                ":alice JOIN #c",
            ]
        );
        assert!(h.matrix.channel_manager.get("b").is_none());
    }

    #[test]
    fn test_join_without_param_is_ignored() {
        let mut h = Harness::new();
        let a = h.connect_as("alice");
        h.send(a, "JOIN").unwrap();
        assert!(h.lines(a).is_empty());
    }

    #[test]
    fn test_channel_names_are_case_sensitive() {
        let mut h = Harness::new();
        let a = h.connect_as("alice");
        h.send(a, "JOIN #Rust,#rust").unwrap();
        assert_eq!(h.matrix.channel_manager.channels.len(), 2);
    }
}
