//! Outbound line construction.
//!
//! Inbound lines become [`crate::Message`] through the parser; everything the
//! server writes goes through [`Reply`] instead, which always emits the
//! last argument in trailing form when one is given:
//!
//! ```text
//! :server <CODE> <nick> <args...> :<text>
//! :sender <VERB> <target> :<text>
//! ```

use std::fmt::{self, Display, Formatter};

use crate::response::Response;

/// An outbound protocol line, without its CRLF terminator.
///
/// # Example
///
/// ```
/// use lineirc_proto::{Reply, Response};
///
/// let line = Reply::numeric("irc.test", Response::ERR_NOTONCHANNEL, "alice")
///     .arg("#lobby")
///     .trailing("You're not on that channel");
/// assert_eq!(
///     line.to_string(),
///     ":irc.test 442 alice #lobby :You're not on that channel"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct Reply {
    prefix: Option<String>,
    verb: String,
    args: Vec<String>,
    trailing: Option<String>,
}

impl Reply {
    /// A line with no prefix, e.g. `ERROR :Closing Link`.
    pub fn bare(verb: impl Into<String>) -> Self {
        Self {
            prefix: None,
            verb: verb.into(),
            args: Vec::new(),
            trailing: None,
        }
    }

    /// A line relayed on behalf of `source`, e.g. `:alice JOIN #lobby`.
    pub fn from_source(source: impl Into<String>, verb: impl Into<String>) -> Self {
        Self {
            prefix: Some(source.into()),
            ..Self::bare(verb)
        }
    }

    /// A numeric reply from `server` addressed to `nick`.
    pub fn numeric(server: &str, code: Response, nick: &str) -> Self {
        Self::from_source(server, code.to_string()).arg(nick)
    }

    /// A server NOTICE to `target`.
    pub fn notice(server: &str, target: &str, text: impl Into<String>) -> Self {
        Self::from_source(server, "NOTICE").arg(target).trailing(text)
    }

    /// Append a middle argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set the trailing argument (always written after ` :`).
    pub fn trailing(mut self, text: impl Into<String>) -> Self {
        self.trailing = Some(text.into());
        self
    }

    /// The verb or numeric of this line.
    pub fn verb(&self) -> &str {
        &self.verb
    }
}

impl Display for Reply {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        f.write_str(&self.verb)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        if let Some(ref text) = self.trailing {
            write!(f, " :{}", text)?;
        }
        Ok(())
    }
}
