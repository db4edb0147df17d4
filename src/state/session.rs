//! Per-connection session state.
//!
//! A [`Session`] is everything the server knows about one connected client:
//! its nickname, the channels it joined, the bytes read but not yet framed,
//! and the bytes queued for writing. Sessions live behind
//! `Arc<parking_lot::Mutex<_>>` in the [`UserManager`](super::UserManager)
//! and are only ever locked for short, non-nested critical sections.

use bytes::{Buf, BytesMut};
use lineirc_proto::{LineBuffer, LineError};
use std::collections::BTreeSet;
use std::fmt::{Display, Write as _};
use std::net::SocketAddr;

use super::SessionId;

/// Nickname shown for a client that has not chosen one yet.
pub const PLACEHOLDER_NICK: &str = "*";

/// A connected client.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    addr: Option<SocketAddr>,
    nick: String,
    /// Joined channel names, ordered so cleanup is deterministic.
    channels: BTreeSet<String>,
    inbound: LineBuffer,
    outbox: BytesMut,
    closing: bool,
    quit_announced: bool,
}

impl Session {
    pub fn new(id: SessionId, addr: Option<SocketAddr>, inbound: LineBuffer) -> Self {
        Self {
            id,
            addr,
            nick: PLACEHOLDER_NICK.to_string(),
            channels: BTreeSet::new(),
            inbound,
            outbox: BytesMut::new(),
            closing: false,
            quit_announced: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn addr(&self) -> Option<SocketAddr> {
        self.addr
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Whether the client has chosen a nickname.
    pub fn has_nick(&self) -> bool {
        self.nick != PLACEHOLDER_NICK
    }

    /// Replace the nickname, returning the previous one.
    pub fn set_nick(&mut self, nick: impl Into<String>) -> String {
        std::mem::replace(&mut self.nick, nick.into())
    }

    // ========================================================================
    // Channel membership (session side)
    // ========================================================================

    pub fn is_in(&self, channel: &str) -> bool {
        self.channels.contains(channel)
    }

    /// Record a joined channel. Returns false if it was already recorded.
    pub fn add_channel(&mut self, channel: &str) -> bool {
        self.channels.insert(channel.to_string())
    }

    /// Forget a channel. Returns false if it was not recorded.
    pub fn remove_channel(&mut self, channel: &str) -> bool {
        self.channels.remove(channel)
    }

    pub fn channels(&self) -> Vec<String> {
        self.channels.iter().cloned().collect()
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Buffer freshly read bytes.
    pub fn append_input(&mut self, data: &[u8]) {
        self.inbound.append(data);
    }

    /// Next complete inbound line, if any.
    pub fn next_line(&mut self) -> Option<Result<String, LineError>> {
        self.inbound.next_line()
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Queue one protocol line; CRLF is appended here.
    pub fn send(&mut self, line: impl Display) {
        // Writing into BytesMut cannot fail.
        let _ = write!(self.outbox, "{line}\r\n");
    }

    pub fn has_pending_output(&self) -> bool {
        !self.outbox.is_empty()
    }

    /// Bytes waiting to be written to the socket.
    pub fn pending_output(&self) -> &[u8] {
        &self.outbox
    }

    /// Drop the first `n` bytes after a (possibly partial) socket write.
    pub fn consume_output(&mut self, n: usize) {
        self.outbox.advance(n.min(self.outbox.len()));
    }

    // ========================================================================
    // Lifecycle flags
    // ========================================================================

    /// Stop processing further input from this session.
    pub fn mark_closing(&mut self) {
        self.closing = true;
    }

    pub fn is_closing(&self) -> bool {
        self.closing
    }

    /// Record that a QUIT line already went out to co-members.
    pub fn mark_quit_announced(&mut self) {
        self.quit_announced = true;
    }

    pub fn quit_announced(&self) -> bool {
        self.quit_announced
    }

    /// Drain queued output as individual lines (CRLF stripped).
    #[cfg(test)]
    pub(crate) fn take_lines(&mut self) -> Vec<String> {
        let raw = self.outbox.split();
        String::from_utf8_lossy(&raw)
            .split("\r\n")
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(SessionId::new(2), None, LineBuffer::new())
    }

    #[test]
    fn test_starts_with_placeholder_nick() {
        let mut s = session();
        assert_eq!(s.nick(), PLACEHOLDER_NICK);
        assert!(!s.has_nick());
        assert_eq!(s.set_nick("alice"), "*");
        assert!(s.has_nick());
    }

    #[test]
    fn test_channel_bookkeeping() {
        let mut s = session();
        assert!(s.add_channel("#b"));
        assert!(s.add_channel("#a"));
        assert!(!s.add_channel("#a"));
        assert_eq!(s.channels(), vec!["#a", "#b"]);
        assert!(s.remove_channel("#a"));
        assert!(!s.remove_channel("#a"));
        assert!(!s.is_in("#a"));
        assert!(s.is_in("#b"));
    }

    #[test]
    fn test_output_queue_and_partial_write() {
        let mut s = session();
        s.send("PING :x");
        assert_eq!(s.pending_output(), b"PING :x\r\n");
        s.consume_output(4);
        assert_eq!(s.pending_output(), b" :x\r\n");
        s.consume_output(100);
        assert!(!s.has_pending_output());
    }

    #[test]
    fn test_input_framing() {
        let mut s = session();
        s.append_input(b"NICK a\r\nJOI");
        assert_eq!(s.next_line(), Some(Ok("NICK a".to_string())));
        assert_eq!(s.next_line(), None);
        s.append_input(b"N #x\n");
        assert_eq!(s.next_line(), Some(Ok("JOIN #x".to_string())));
    }

    #[test]
    fn test_take_lines() {
        let mut s = session();
        s.send("A");
        s.send("B :c d");
        assert_eq!(s.take_lines(), vec!["A", "B :c d"]);
        assert!(!s.has_pending_output());
    }
}
