use std::fmt::{self, Display, Formatter};

use smallvec::SmallVec;

/// Parameter storage; most lines carry at most a handful of parameters.
pub(crate) type Params = SmallVec<[String; 4]>;

/// A parsed IRC line.
///
/// Holds the optional prefix (without its leading `:`), the command token as
/// received, and the ordered parameters with the trailing parameter (if any)
/// last. Messages are immutable once parsed.
///
/// # Example
///
/// ```
/// use lineirc_proto::Message;
///
/// let msg: Message = ":dave!user@host PRIVMSG #channel :Hello World!".parse().unwrap();
/// assert_eq!(msg.prefix(), Some("dave!user@host"));
/// assert_eq!(msg.command(), "PRIVMSG");
/// assert_eq!(msg.arg(1), Some("Hello World!"));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
    prefix: Option<String>,
    command: String,
    params: Params,
}

impl Message {
    pub(crate) fn from_parts(prefix: Option<&str>, command: &str, params: Params) -> Self {
        Self {
            prefix: prefix.map(str::to_owned),
            command: command.to_owned(),
            params,
        }
    }

    /// The source prefix, if the line carried one.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The command token exactly as received (case is not normalized).
    pub fn command(&self) -> &str {
        &self.command
    }

    /// All parameters in order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The parameter at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Number of parameters.
    pub fn arg_count(&self) -> usize {
        self.params.len()
    }

    /// Whether the command is a three-digit numeric.
    pub fn is_numeric(&self) -> bool {
        self.command.len() == 3 && self.command.bytes().all(|b| b.is_ascii_digit())
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        write!(f, "{}", self.command)?;

        let last = self.params.len().saturating_sub(1);
        for (i, param) in self.params.iter().enumerate() {
            let needs_colon =
                i == last && (param.is_empty() || param.contains(' ') || param.starts_with(':'));
            if needs_colon {
                write!(f, " :{}", param)?;
            } else {
                write!(f, " {}", param)?;
            }
        }
        Ok(())
    }
}
