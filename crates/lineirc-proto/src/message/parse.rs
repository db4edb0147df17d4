//! Message parsing.
//!
//! Grammar:
//!
//! ```text
//! line    = [ ":" prefix SPACE+ ] command [ SPACE+ tail ]
//! prefix  = 1*( any non-space )
//! command = 1*letter / 3digit
//! ```
//!
//! The tail is split by [`split_params`]: the first ` :` starts the trailing
//! parameter, which is kept verbatim including spaces and colons.

use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::{take_till1, take_while1, take_while_m_n},
    character::complete::char,
    combinator::{all_consuming, eof, opt, rest},
    sequence::{preceded, terminated, tuple},
    IResult,
};

use super::types::{Message, Params};
use crate::error::ParseError;

/// Whitespace as understood by the grammar (space, tab, VT, FF, CR, LF).
#[inline]
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0B' | '\x0C' | '\r' | '\n')
}

/// `:prefix` followed by at least one whitespace character.
fn parse_prefix(input: &str) -> IResult<&str, &str> {
    terminated(preceded(char(':'), take_till1(is_space)), take_while1(is_space))(input)
}

/// Command name: letters only, or exactly three digits.
fn parse_command(input: &str) -> IResult<&str, &str> {
    alt((
        take_while1(|c: char| c.is_ascii_alphabetic()),
        take_while_m_n(3, 3, |c: char| c.is_ascii_digit()),
    ))(input)
}

/// Everything after the whitespace that follows the command, or nothing.
fn parse_tail(input: &str) -> IResult<&str, &str> {
    alt((preceded(take_while1(is_space), rest), eof))(input)
}

fn parse_message(input: &str) -> IResult<&str, (Option<&str>, &str, &str)> {
    all_consuming(tuple((opt(parse_prefix), parse_command, parse_tail)))(input)
}

/// Split the parameter tail into ordinary and trailing parameters.
fn split_params(tail: &str) -> Params {
    let mut params = Params::new();
    if tail.is_empty() {
        return params;
    }

    let words = |s: &str, params: &mut Params| {
        params.extend(s.split(is_space).filter(|w| !w.is_empty()).map(str::to_owned));
    };

    if let Some(idx) = tail.find(" :") {
        words(&tail[..idx], &mut params);
        params.push(tail[idx + 2..].to_owned());
    } else if let Some(trailing) = tail.strip_prefix(':') {
        params.push(trailing.to_owned());
    } else {
        words(tail, &mut params);
    }

    params
}

/// Whether a failed line is a bare prefix with nothing after it.
fn is_prefix_only(line: &str) -> bool {
    match line.strip_prefix(':') {
        Some(after) => match after.find(is_space) {
            Some(idx) => after[idx..].chars().all(is_space),
            None => true,
        },
        None => false,
    }
}

impl Message {
    /// Parse one protocol line.
    ///
    /// A trailing CR/LF is ignored. Fails with a [`ParseError`] when the line
    /// is empty or blank, or does not match the grammar.
    pub fn parse(line: &str) -> Result<Message, ParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.chars().all(is_space) {
            return Err(ParseError::Empty);
        }

        match parse_message(line) {
            Ok((_, (prefix, command, tail))) => {
                Ok(Message::from_parts(prefix, command, split_params(tail)))
            }
            Err(_) if is_prefix_only(line) => Err(ParseError::MissingCommand {
                line: line.to_owned(),
            }),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                Err(ParseError::InvalidFormat {
                    line: line.to_owned(),
                    position: line.len() - e.input.len(),
                })
            }
            Err(nom::Err::Incomplete(_)) => Err(ParseError::InvalidFormat {
                line: line.to_owned(),
                position: line.len(),
            }),
        }
    }
}

impl FromStr for Message {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Message, Self::Err> {
        Message::parse(s)
    }
}
