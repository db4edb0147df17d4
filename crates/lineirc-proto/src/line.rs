//! Per-connection line framing.
//!
//! Reads arrive in arbitrary chunks: one read can hold several lines, and a
//! line can span several reads. [`LineBuffer`] accumulates raw bytes and hands
//! back complete lines one at a time, so callers must drain it with
//! [`LineBuffer::next_line`] after every append.

use bytes::{Buf, BytesMut};

use crate::error::LineError;

/// Byte accumulator that yields `\n`-terminated lines.
///
/// Lines are split on raw bytes before UTF-8 decoding, so a multi-byte
/// character cut in half by a read boundary is reassembled correctly.
/// Invalid UTF-8 is replaced with U+FFFD.
///
/// By default no length cap applies and a sender that never terminates its
/// line grows the buffer without bound. [`LineBuffer::with_max_len`] turns
/// the cap on.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: BytesMut,
    /// Index of next byte to check for newline
    next_index: usize,
    max_len: Option<usize>,
    /// Set while skipping the remainder of an overlong line.
    discarding: bool,
}

impl LineBuffer {
    /// Create an unbounded buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer that rejects lines longer than `max_len` bytes
    /// (terminator excluded).
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            max_len: Some(max_len),
            ..Self::default()
        }
    }

    /// Append freshly read bytes.
    pub fn append(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Bytes currently buffered (complete and partial lines).
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Remove and return the first complete line.
    ///
    /// The terminating `\n` and one preceding `\r` are stripped. Returns
    /// `None` when no terminator has arrived yet. With a cap configured, an
    /// overlong line is dropped and reported once as [`LineError::TooLong`];
    /// framing resumes after its terminator.
    pub fn next_line(&mut self) -> Option<Result<String, LineError>> {
        loop {
            let found = self.buf[self.next_index..]
                .iter()
                .position(|b| *b == b'\n');

            let Some(offset) = found else {
                self.next_index = self.buf.len();
                return self.check_partial();
            };

            let end = self.next_index + offset;
            self.next_index = 0;

            if self.discarding {
                self.buf.advance(end + 1);
                self.discarding = false;
                continue;
            }

            let raw = self.buf.split_to(end + 1);
            let mut line = &raw[..end];
            if let Some(stripped) = line.strip_suffix(b"\r") {
                line = stripped;
            }

            if let Some(limit) = self.max_len {
                if line.len() > limit {
                    return Some(Err(LineError::TooLong {
                        actual: line.len(),
                        limit,
                    }));
                }
            }

            return Some(Ok(String::from_utf8_lossy(line).into_owned()));
        }
    }

    /// Enforce the cap on an unterminated line.
    fn check_partial(&mut self) -> Option<Result<String, LineError>> {
        let limit = self.max_len?;
        if self.discarding {
            self.buf.clear();
            self.next_index = 0;
            return None;
        }
        // A trailing CR may still be waiting for its LF.
        let pending = self.buf.len() - usize::from(self.buf.ends_with(b"\r"));
        if pending > limit {
            let actual = pending;
            self.buf.clear();
            self.next_index = 0;
            self.discarding = true;
            return Some(Err(LineError::TooLong { actual, limit }));
        }
        None
    }
}
