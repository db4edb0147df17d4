//! QUIT command handler.

use super::super::{Context, Handler, HandlerResult, parse_reason};
use lineirc_proto::{Message, Reply};
use std::borrow::Cow;
use tracing::info;

/// Reason used when QUIT carries none.
const DEFAULT_QUIT_REASON: &str = "Client Quit";

/// Handler for QUIT command.
///
/// Announces the quit once to every peer, sends the closing ERROR line to
/// the quitter and asks the reactor to close the connection. Channel
/// cleanup happens in the disconnect path, which stays silent because the
/// QUIT already went out.
pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let reason = parse_reason(msg.arg(0)).unwrap_or(Cow::Borrowed(DEFAULT_QUIT_REASON));
        let session = ctx.session()?;
        let nick = session.lock().nick().to_string();

        let quit = Reply::from_source(nick.as_str(), "QUIT").trailing(&*reason);
        let peers = ctx.matrix.peers_of(ctx.id);
        let notified = ctx.matrix.broadcast(peers, &quit, Some(ctx.id));
        session.lock().mark_quit_announced();

        let closing = Reply::bare("ERROR").trailing(format!("Closing Link: {nick} ({reason})"));
        ctx.reply(&closing);
        ctx.request_close(&*reason);

        info!(session = %ctx.id, nick = %nick, reason = %reason, notified, "Client quit");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::Harness;

    #[test]
    fn test_quit_with_reason() {
        let mut h = Harness::new();
        let a = h.connect_as("alice");
        let b = h.connect_as("bob");
        h.send(a, "JOIN #x").unwrap();
        h.send(b, "JOIN #x").unwrap();
        h.drain_all();

        h.send(a, "QUIT :gone fishing").unwrap();
        assert_eq!(h.lines(a), vec!["ERROR :Closing Link: alice (gone fishing)"]);
        assert_eq!(h.lines(b), vec![":alice QUIT :gone fishing"]);

        let closes = h.matrix.take_close_requests();
        assert_eq!(closes, vec![(a, "gone fishing".to_string())]);
    }

    #[test]
    fn test_quit_default_reason() {
        let mut h = Harness::new();
        let a = h.connect();
        h.send(a, "QUIT").unwrap();
        assert_eq!(h.lines(a), vec!["ERROR :Closing Link: * (Client Quit)"]);
    }

    #[test]
    fn test_quit_reaches_shared_peer_once_and_cleanup_is_silent() {
        let mut h = Harness::new();
        let a = h.connect_as("alice");
        let b = h.connect_as("bob");
        h.send(a, "JOIN #one,#two").unwrap();
        h.send(b, "JOIN #one,#two").unwrap();
        h.drain_all();

        h.send(a, "QUIT :bye").unwrap();
        assert_eq!(h.lines(b), vec![":alice QUIT :bye"]);

        h.matrix.disconnect(a, "bye");
        assert!(h.lines(b).is_empty());
        assert_eq!(h.matrix.channel_manager.get("#one").unwrap().members(), vec![b]);
        assert_eq!(h.matrix.user_manager.resolve_nick("alice"), None);
    }

    #[test]
    fn test_input_after_quit_is_marked_closing() {
        let mut h = Harness::new();
        let a = h.connect();
        h.send(a, "QUIT").unwrap();
        let session = h.matrix.user_manager.get(a).unwrap();
        assert!(session.lock().is_closing());
    }

    #[test]
    fn test_quit_reason_line_breaks_removed() {
        let mut h = Harness::new();
        let a = h.connect_as("alice");
        let b = h.connect_as("bob");
        h.send(a, "JOIN #x").unwrap();
        h.send(b, "JOIN #x").unwrap();
        h.drain_all();

        h.send(a, "QUIT :bye\r:irc.test 001 bob forged").unwrap();
        assert_eq!(h.lines(b), vec![":alice QUIT :bye:irc.test 001 bob forged"]);
        assert_eq!(
            h.lines(a),
            vec!["ERROR :Closing Link: alice (bye:irc.test 001 bob forged)"]
        );
    }
}
