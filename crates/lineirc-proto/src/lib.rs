//! # lineirc-proto
//!
//! Protocol layer for the lineircd IRC dialect.
//!
//! ## Features
//!
//! - Line framing over a byte stream ([`LineBuffer`])
//! - Parsing of `[:prefix] COMMAND [params] [:trailing]` lines into an
//!   immutable [`Message`]
//! - Numeric reply codes ([`Response`]) and outbound line building ([`Reply`])
//!
//! ## Quick Start
//!
//! ```rust
//! use lineirc_proto::{LineBuffer, Message};
//!
//! let mut buf = LineBuffer::new();
//! buf.append(b"PRIVMSG #lobby :hello there\r\nPI");
//!
//! let line = buf.next_line().unwrap().unwrap();
//! let msg: Message = line.parse().unwrap();
//! assert_eq!(msg.command(), "PRIVMSG");
//! assert_eq!(msg.params(), &["#lobby", "hello there"]);
//!
//! // The second line is still incomplete.
//! assert!(buf.next_line().is_none());
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod chan;
pub mod error;
pub mod line;
pub mod message;
pub mod reply;
pub mod response;

pub use self::chan::{ChannelExt, CHANNEL_SIGIL};
pub use self::error::{LineError, ParseError};
pub use self::line::LineBuffer;
pub use self::message::Message;
pub use self::reply::Reply;
pub use self::response::Response;
