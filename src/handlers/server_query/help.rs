//! HELP command handler.
//!
//! Returns help text for the supported commands.
//! RFC 2812 doesn't define HELP, but it's a common modern extension.

use super::super::{Context, Handler, HandlerResult, Verb};
use lineirc_proto::{Message, Reply, Response};

/// Handler for HELP command.
pub struct HelpHandler;

impl Handler for HelpHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let server = ctx.server_name();
        let nick = ctx.nick();
        let numeric = |code| Reply::numeric(server, code, &nick);

        match msg.arg(0) {
            Some(topic) => {
                let topic_upper = topic.to_ascii_uppercase();
                match topic_upper.parse::<Verb>() {
                    Ok(verb) => {
                        let (syntax, description) = verb.usage();
                        ctx.reply(&numeric(Response::RPL_HELPSTART).arg(verb.name()).trailing(syntax));
                        ctx.reply(&numeric(Response::RPL_HELPTXT).arg(verb.name()).trailing(description));
                        ctx.reply(&numeric(Response::RPL_ENDOFHELP).arg(verb.name()).trailing("End of /HELP"));
                    }
                    Err(_) => {
                        ctx.reply(
                            &numeric(Response::ERR_HELPNOTFOUND)
                                .arg(topic)
                                .trailing("No help available on that topic"),
                        );
                    }
                }
            }
            None => {
                ctx.reply(&numeric(Response::RPL_HELPSTART).arg("index").trailing("Available commands:"));
                for verb in Verb::ALL {
                    let (syntax, description) = verb.usage();
                    ctx.reply(
                        &numeric(Response::RPL_HELPTXT)
                            .arg("index")
                            .trailing(format!("{syntax} - {description}")),
                    );
                }
                ctx.reply(&numeric(Response::RPL_ENDOFHELP).arg("index").trailing("End of /HELP"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::Verb;
    use crate::handlers::testing::Harness;

    #[test]
    fn test_help_index_lists_every_verb() {
        let mut h = Harness::new();
        let a = h.connect_as("alice");
        h.send(a, "HELP").unwrap();
        let lines = h.lines(a);

        assert_eq!(lines.len(), Verb::ALL.len() + 2);
        assert_eq!(lines[0], ":irc.test 704 alice index :Available commands:");
        assert_eq!(lines.last().unwrap(), ":irc.test 706 alice index :End of /HELP");
        for verb in Verb::ALL {
            assert!(
                lines.iter().any(|l| l.starts_with(&format!(":irc.test 705 alice index :{}", verb.name()))),
                "missing {verb}"
            );
        }
    }

    #[test]
    fn test_help_topic() {
        let mut h = Harness::new();
        let a = h.connect_as("alice");
        h.send(a, "HELP part").unwrap();
        assert_eq!(
            h.lines(a),
            vec![
                ":irc.test 704 alice PART :PART <#channel>[,<#channel>...] [:reason]",
                ":irc.test 705 alice PART :Leaves channels.",
                ":irc.test 706 alice PART :End of /HELP",
            ]
        );
    }

    #[test]
    fn test_help_unknown_topic() {
        let mut h = Harness::new();
        let a = h.connect_as("alice");
        h.send(a, "HELP KILL").unwrap();
        assert_eq!(
            h.lines(a),
            vec![":irc.test 524 alice KILL :No help available on that topic"]
        );
    }
}
