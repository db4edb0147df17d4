//! Connection - one accepted socket and the session it feeds.
//!
//! A `Connection` owns the non-blocking stream. Bytes read from it go into
//! the session's framer; bytes queued on the session are written back out.
//! Write interest is only registered while output is pending, so an idle
//! connection never wakes the reactor for writability.

use crate::state::{SessionId, SessionRef};
use mio::net::TcpStream;
use mio::{Interest, Registry, Token};
use std::io::{self, Read, Write};
use std::net::SocketAddr;

/// Outcome of draining a socket's readable bytes.
#[derive(Debug)]
pub enum ReadOutcome {
    /// The socket would block; the connection stays open.
    Drained,
    /// The peer closed its side.
    Closed,
    /// Reading failed.
    Failed(io::Error),
}

pub struct Connection {
    stream: TcpStream,
    addr: SocketAddr,
    id: SessionId,
    session: SessionRef,
    write_interest: bool,
}

impl Connection {
    pub fn new(stream: TcpStream, addr: SocketAddr, id: SessionId, session: SessionRef) -> Self {
        Self {
            stream,
            addr,
            id,
            session,
            write_interest: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn session(&self) -> &SessionRef {
        &self.session
    }

    pub fn token(&self) -> Token {
        Token(self.id.raw())
    }

    /// Read until the socket would block, handing each chunk to `on_chunk`.
    ///
    /// `on_chunk` returns false to stop reading early (the session asked to
    /// close); unread bytes are left in the kernel buffer and dropped with
    /// the socket.
    pub fn read_available(
        &mut self,
        buf: &mut [u8],
        mut on_chunk: impl FnMut(&[u8]) -> bool,
    ) -> ReadOutcome {
        loop {
            match self.stream.read(buf) {
                Ok(0) => return ReadOutcome::Closed,
                Ok(n) => {
                    if !on_chunk(&buf[..n]) {
                        return ReadOutcome::Drained;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return ReadOutcome::Drained,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return ReadOutcome::Failed(e),
            }
        }
    }

    /// Write as much queued output as the socket accepts.
    ///
    /// Returns true once the queue is empty, false if the socket would
    /// block with output still pending.
    pub fn flush(&mut self) -> io::Result<bool> {
        let mut session = self.session.lock();
        while session.has_pending_output() {
            match self.stream.write(session.pending_output()) {
                Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
                Ok(n) => session.consume_output(n),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(false),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(true)
    }

    /// Register for writability only while output is pending.
    pub fn update_interest(&mut self, registry: &Registry, drained: bool) -> io::Result<()> {
        let want_write = !drained;
        if want_write == self.write_interest {
            return Ok(());
        }
        let interest = if want_write {
            Interest::READABLE | Interest::WRITABLE
        } else {
            Interest::READABLE
        };
        let token = self.token();
        registry.reregister(&mut self.stream, token, interest)?;
        self.write_interest = want_write;
        Ok(())
    }

    pub fn register(&mut self, registry: &Registry) -> io::Result<()> {
        let token = self.token();
        registry.register(&mut self.stream, token, Interest::READABLE)
    }

    pub fn deregister(&mut self, registry: &Registry) -> io::Result<()> {
        registry.deregister(&mut self.stream)
    }
}
