//! PING and PONG handlers.

use super::super::{Context, Handler, HandlerResult};
use lineirc_proto::{Message, Reply};
use tracing::trace;

/// Handler for PING command.
pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // PING [token]; echo the server name when no token is given
        let server = ctx.server_name();
        let token = msg.arg(0).unwrap_or(server);

        let pong = Reply::from_source(server, "PONG").arg(server).trailing(token);
        ctx.reply(&pong);

        Ok(())
    }
}

/// Handler for PONG command.
pub struct PongHandler;

impl Handler for PongHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // Nothing to answer; liveness is not tracked
        trace!(session = %ctx.id, token = ?msg.arg(0), "PONG received");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::Harness;

    #[test]
    fn test_ping_with_token() {
        let mut h = Harness::new();
        let a = h.connect();
        h.send(a, "PING :12345").unwrap();
        assert_eq!(h.lines(a), vec![":irc.test PONG irc.test :12345"]);
    }

    #[test]
    fn test_ping_without_token() {
        let mut h = Harness::new();
        let a = h.connect();
        h.send(a, "PING").unwrap();
        assert_eq!(h.lines(a), vec![":irc.test PONG irc.test :irc.test"]);
    }

    #[test]
    fn test_pong_is_silent() {
        let mut h = Harness::new();
        let a = h.connect();
        h.send(a, "PONG :x").unwrap();
        assert!(h.lines(a).is_empty());
    }
}
