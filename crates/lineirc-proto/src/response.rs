//! Numeric reply codes used by this dialect.
//!
//! Only the handful of numerics the server actually emits are listed; the
//! names follow RFC 2812 and modern IRC documentation.
//!
//! # Reference
//! - RFC 2812: Internet Relay Chat: Client Protocol
//! - Modern IRC documentation: <https://modern.ircdocs.horse/>

#![allow(non_camel_case_types)]

use std::fmt;

/// IRC server response code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    // === Command Responses (200-399) ===
    /// 321 - Start of LIST
    RPL_LISTSTART = 321,
    /// 322 - LIST entry
    RPL_LIST = 322,
    /// 323 - End of LIST
    RPL_LISTEND = 323,

    // === Error Replies (400-599) ===
    /// 400 - Unknown error
    ERR_UNKNOWNERROR = 400,
    /// 401 - No such nick/channel
    ERR_NOSUCHNICK = 401,
    /// 403 - No such channel
    ERR_NOSUCHCHANNEL = 403,
    /// 417 - Input line too long
    ERR_INPUTTOOLONG = 417,
    /// 421 - Unknown command
    ERR_UNKNOWNCOMMAND = 421,
    /// 432 - Erroneous nickname
    ERR_ERRONEUSNICKNAME = 432,
    /// 433 - Nickname in use
    ERR_NICKNAMEINUSE = 433,
    /// 442 - Not on channel
    ERR_NOTONCHANNEL = 442,
    /// 461 - Not enough parameters
    ERR_NEEDMOREPARAMS = 461,
    /// 524 - No help for topic
    ERR_HELPNOTFOUND = 524,

    // === Extended (600-999) ===
    /// 704 - Start of HELP
    RPL_HELPSTART = 704,
    /// 705 - HELP text
    RPL_HELPTXT = 705,
    /// 706 - End of HELP
    RPL_ENDOFHELP = 706,
}

impl Response {
    /// The numeric value.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Whether this is an error numeric (400-599).
    pub fn is_error(self) -> bool {
        (400..600).contains(&self.code())
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_and_display() {
        assert_eq!(Response::ERR_NICKNAMEINUSE.code(), 433);
        assert_eq!(Response::RPL_LIST.to_string(), "322");
        assert!(Response::ERR_NOTONCHANNEL.is_error());
        assert!(!Response::RPL_LISTEND.is_error());
    }
}
