//! Error types for the protocol library.
//!
//! [`ParseError`] covers malformed lines handed to the parser, and
//! [`LineError`] covers framing failures in [`crate::LineBuffer`].

use thiserror::Error;

/// A line that does not match the message grammar.
///
/// Every variant is a recoverable per-line failure: the caller rejects the
/// line and keeps the connection open.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The line was empty or contained only whitespace.
    #[error("message cannot be empty")]
    Empty,

    /// A `:prefix` token was present but nothing followed it.
    #[error("prefix without command: {line}")]
    MissingCommand {
        /// The offending line.
        line: String,
    },

    /// The line did not match `[:prefix] command [params]`.
    #[error("invalid message format at byte {position}: {line}")]
    InvalidFormat {
        /// The offending line.
        line: String,
        /// Byte offset where matching stopped.
        position: usize,
    },
}

impl ParseError {
    /// Static label for log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::MissingCommand { .. } => "missing_command",
            Self::InvalidFormat { .. } => "invalid_format",
        }
    }
}

/// Framing errors reported by [`crate::LineBuffer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// A line grew past the configured cap before its terminator arrived.
    ///
    /// The buffered bytes of that line have been discarded.
    #[error("line too long: {actual} bytes (limit: {limit})")]
    TooLong {
        /// Bytes seen for the line when it was dropped.
        actual: usize,
        /// Configured maximum.
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ParseError::Empty.error_code(), "empty");
        let err = ParseError::MissingCommand {
            line: ":nick".into(),
        };
        assert_eq!(err.error_code(), "missing_command");
    }

    #[test]
    fn test_display_includes_line() {
        let err = ParseError::InvalidFormat {
            line: "PING123".into(),
            position: 0,
        };
        assert!(err.to_string().contains("PING123"));

        let err = LineError::TooLong {
            actual: 600,
            limit: 512,
        };
        assert_eq!(err.to_string(), "line too long: 600 bytes (limit: 512)");
    }
}
