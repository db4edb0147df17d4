//! The closed set of commands this server understands.

use std::fmt;
use std::str::FromStr;

/// A recognized command verb.
///
/// Dispatch resolves the (uppercased) command name to a `Verb`; anything
/// that does not resolve is answered with ERR_UNKNOWNCOMMAND.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    Nick,
    Join,
    Part,
    Privmsg,
    Ping,
    Pong,
    Quit,
    List,
    Help,
}

impl Verb {
    /// Every verb, in the order HELP lists them.
    pub const ALL: [Verb; 9] = [
        Verb::Nick,
        Verb::Join,
        Verb::Part,
        Verb::Privmsg,
        Verb::Ping,
        Verb::Pong,
        Verb::Quit,
        Verb::List,
        Verb::Help,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Verb::Nick => "NICK",
            Verb::Join => "JOIN",
            Verb::Part => "PART",
            Verb::Privmsg => "PRIVMSG",
            Verb::Ping => "PING",
            Verb::Pong => "PONG",
            Verb::Quit => "QUIT",
            Verb::List => "LIST",
            Verb::Help => "HELP",
        }
    }

    /// Syntax and one-line description, shown by HELP.
    pub fn usage(self) -> (&'static str, &'static str) {
        match self {
            Verb::Nick => ("NICK <nickname>", "Sets or changes your nickname."),
            Verb::Join => ("JOIN <#channel>[,<#channel>...]", "Joins channels, creating them if needed."),
            Verb::Part => ("PART <#channel>[,<#channel>...] [:reason]", "Leaves channels."),
            Verb::Privmsg => ("PRIVMSG <#channel|nickname> :<text>", "Sends a message."),
            Verb::Ping => ("PING [:token]", "Checks the connection; the server answers with PONG."),
            Verb::Pong => ("PONG [:token]", "Answers a PING."),
            Verb::Quit => ("QUIT [:reason]", "Disconnects from the server."),
            Verb::List => ("LIST", "Lists channels and their member counts."),
            Verb::Help => ("HELP [command]", "Shows this help."),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a command name is not a known verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVerb;

impl FromStr for Verb {
    type Err = UnknownVerb;

    /// Exact, uppercase match. Callers uppercase first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .into_iter()
            .find(|verb| verb.name() == s)
            .ok_or(UnknownVerb)
    }
}
