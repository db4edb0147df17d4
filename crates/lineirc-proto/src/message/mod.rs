//! IRC message model and parser.
//!
//! A [`Message`] can only be obtained by parsing a line, either with
//! [`Message::parse`] or through [`std::str::FromStr`].

mod parse;
mod types;

pub use self::types::Message;
