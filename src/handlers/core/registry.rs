//! Command handler registry and dispatch.
//!
//! The `Registry` maps every [`Verb`] to its handler and is the fault
//! isolation boundary for command processing: whatever a handler does, the
//! session gets a reply and the reactor keeps running.

use super::context::{Context, Handler, HandlerError, HandlerResult};
use super::verb::Verb;
use crate::handlers::{
    channel::{JoinHandler, ListHandler, PartHandler},
    connection::{NickHandler, PingHandler, PongHandler, QuitHandler},
    messaging::PrivmsgHandler,
    server_query::HelpHandler,
};
use lineirc_proto::{ChannelExt, Message};
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::{Level, debug, error, span};

/// Registry of command handlers.
pub struct Registry {
    handlers: HashMap<Verb, Box<dyn Handler>>,
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let handlers = Verb::ALL
            .into_iter()
            .map(|verb| (verb, handler_for(verb)))
            .collect();
        Self { handlers }
    }

    /// Swap in a different handler for `verb`.
    #[cfg(test)]
    pub(crate) fn replace(&mut self, verb: Verb, handler: Box<dyn Handler>) {
        self.handlers.insert(verb, handler);
    }

    /// Dispatch a message to the appropriate handler.
    ///
    /// The command name is matched case-insensitively. Errors, including a
    /// handler panic, are turned into a reply to the sender before being
    /// returned, so callers only need the result for bookkeeping.
    pub fn dispatch(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let cmd_name = msg.command().to_ascii_uppercase();

        let handler = cmd_name
            .parse::<Verb>()
            .ok()
            .and_then(|verb| self.handlers.get(&verb));

        let result = match handler {
            Some(handler) => {
                let channel = msg.arg(0).filter(|a| a.is_channel_target());
                let irc_span = span!(
                    Level::DEBUG,
                    "irc.command",
                    command = %cmd_name,
                    session = %ctx.id,
                    channel = channel,
                );
                let _enter = irc_span.enter();
                debug!(args = msg.arg_count(), "Dispatching command");

                match panic::catch_unwind(AssertUnwindSafe(|| handler.handle(ctx, msg))) {
                    Ok(result) => result,
                    Err(payload) => Err(HandlerError::Internal(panic_message(payload.as_ref()))),
                }
            }
            None => Err(HandlerError::UnknownCommand(cmd_name.clone())),
        };

        if let Err(ref e) = result {
            match e {
                HandlerError::Internal(detail) => {
                    error!(command = %cmd_name, session = %ctx.id, error = %detail, "Handler failed");
                }
                _ => {
                    debug!(command = %cmd_name, session = %ctx.id, error = %e, code = e.error_code(), "Command error");
                }
            }
            ctx.send_error(e, &cmd_name);
        }

        result
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn handler_for(verb: Verb) -> Box<dyn Handler> {
    match verb {
        Verb::Nick => Box::new(NickHandler),
        Verb::Join => Box::new(JoinHandler),
        Verb::Part => Box::new(PartHandler),
        Verb::Privmsg => Box::new(PrivmsgHandler),
        Verb::Ping => Box::new(PingHandler),
        Verb::Pong => Box::new(PongHandler),
        Verb::Quit => Box::new(QuitHandler),
        Verb::List => Box::new(ListHandler),
        Verb::Help => Box::new(HelpHandler),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
