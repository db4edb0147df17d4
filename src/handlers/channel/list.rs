//! LIST command handler.

use super::super::{Context, Handler, HandlerResult};
use lineirc_proto::{Message, Reply, Response};

/// Handler for LIST command.
///
/// Replies RPL_LISTSTART, one RPL_LIST per channel sorted by name, then
/// RPL_LISTEND. Arguments are ignored.
pub struct ListHandler;

impl Handler for ListHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        let server = ctx.server_name();
        let nick = ctx.nick();

        ctx.reply(
            &Reply::numeric(server, Response::RPL_LISTSTART, &nick)
                .arg("Channel")
                .trailing("Users  Name"),
        );

        for entry in ctx.matrix.channel_manager.list() {
            ctx.reply(
                &Reply::numeric(server, Response::RPL_LIST, &nick)
                    .arg(entry.name)
                    .arg(entry.visible.to_string())
                    .trailing(""),
            );
        }

        ctx.reply(&Reply::numeric(server, Response::RPL_LISTEND, &nick).trailing("End of /LIST"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::Harness;

    #[test]
    fn test_list_empty() {
        let mut h = Harness::new();
        let a = h.connect_as("alice");
        h.send(a, "LIST").unwrap();
        assert_eq!(
            h.lines(a),
            vec![
                ":irc.test 321 alice Channel :Users  Name",
                ":irc.test 323 alice :End of /LIST",
            ]
        );
    }

    #[test]
    fn test_list_sorted_with_counts() {
        let mut h = Harness::new();
        let a = h.connect_as("alice");
        let b = h.connect_as("bob");
        h.send(a, "JOIN #zoo,#ants").unwrap();
        h.send(b, "JOIN #ants").unwrap();
        h.drain_all();

        h.send(b, "LIST").unwrap();
        assert_eq!(
            h.lines(b),
            vec![
                ":irc.test 321 bob Channel :Users  Name",
                ":irc.test 322 bob #ants 2 :",
                ":irc.test 322 bob #zoo 1 :",
                ":irc.test 323 bob :End of /LIST",
            ]
        );
    }
}
