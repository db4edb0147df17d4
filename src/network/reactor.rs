//! Reactor - the single-threaded readiness loop.
//!
//! One thread owns the listening socket, every client socket and the
//! command registry. Each readiness event is handled to completion:
//! accept, read and frame, dispatch, then flush whatever output and close
//! requests the handlers produced. Other threads talk to a running reactor
//! only through a [`ReactorHandle`].

use super::connection::{Connection, ReadOutcome};
use crate::error::ReactorError;
use crate::handlers::{Context, Registry, send_welcome};
use crate::state::{FIRST_SESSION_ID, Matrix, SessionId, SessionRef};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use lineirc_proto::{Message, Reply, Response};
use mio::net::{TcpListener, TcpStream};
use mio::{Events, Interest, Poll, Token, Waker};
use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

const LISTENER: Token = Token(0);
const WAKER: Token = Token(1);

/// Per-read scratch buffer size.
const READ_BUFFER_SIZE: usize = 4096;

const EVENTS_CAPACITY: usize = 1024;

// Session ids double as tokens and must never collide with the fixed ones.
const _: () = assert!(FIRST_SESSION_ID > WAKER.0);

/// Requests delivered to a running reactor from other threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// Send a server NOTICE to every connected session.
    Announce(String),
    /// Close every connection and return from [`Reactor::run`].
    Shutdown,
}

/// Cloneable, thread-safe handle to a reactor.
#[derive(Clone)]
pub struct ReactorHandle {
    tx: Sender<Control>,
    waker: Arc<Waker>,
    local_addr: SocketAddr,
}

// Driven by embedders and tests; the binary itself runs until killed.
#[allow(dead_code)]
impl ReactorHandle {
    /// The address the listener actually bound.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Queue a control message and wake the reactor.
    pub fn send(&self, control: Control) -> Result<(), ReactorError> {
        self.tx.send(control)?;
        self.waker.wake()?;
        Ok(())
    }

    pub fn announce(&self, text: impl Into<String>) -> Result<(), ReactorError> {
        self.send(Control::Announce(text.into()))
    }

    pub fn shutdown(&self) -> Result<(), ReactorError> {
        self.send(Control::Shutdown)
    }
}

/// The event loop.
pub struct Reactor {
    poll: Poll,
    listener: TcpListener,
    connections: HashMap<Token, Connection>,
    matrix: Arc<Matrix>,
    registry: Registry,
    control_rx: Receiver<Control>,
    handle: ReactorHandle,
}

impl Reactor {
    /// Bind the listener and set up the poller. Nothing is accepted until
    /// [`Reactor::run`] is called.
    pub fn bind(addr: SocketAddr, matrix: Arc<Matrix>, registry: Registry) -> Result<Self, ReactorError> {
        let poll = Poll::new()?;
        let mut listener = TcpListener::bind(addr)?;
        poll.registry()
            .register(&mut listener, LISTENER, Interest::READABLE)?;
        let waker = Arc::new(Waker::new(poll.registry(), WAKER)?);
        let local_addr = listener.local_addr()?;
        let (tx, control_rx) = crossbeam_channel::unbounded();

        info!(%local_addr, "Listener bound");

        Ok(Self {
            poll,
            listener,
            connections: HashMap::new(),
            matrix,
            registry,
            control_rx,
            handle: ReactorHandle {
                tx,
                waker,
                local_addr,
            },
        })
    }

    #[allow(dead_code)]
    pub fn handle(&self) -> ReactorHandle {
        self.handle.clone()
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.handle.local_addr
    }

    /// Run until a [`Control::Shutdown`] arrives or polling fails.
    pub fn run(&mut self) -> Result<(), ReactorError> {
        let mut events = Events::with_capacity(EVENTS_CAPACITY);
        let mut buf = vec![0u8; READ_BUFFER_SIZE];

        info!(address = %self.local_addr(), "Reactor running");

        loop {
            if let Err(e) = self.poll.poll(&mut events, None) {
                if e.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(e.into());
            }

            for event in events.iter() {
                match event.token() {
                    LISTENER => self.accept_ready(),
                    WAKER => {
                        if self.drain_control() {
                            info!("Reactor stopped");
                            return Ok(());
                        }
                    }
                    token => {
                        if event.is_writable() {
                            self.flush_connection(token);
                        }
                        if event.is_readable() || event.is_read_closed() || event.is_error() {
                            self.read_connection(token, &mut buf);
                        }
                    }
                }
                self.settle();
            }
        }
    }

    // ========================================================================
    // Accept
    // ========================================================================

    fn accept_ready(&mut self) {
        loop {
            match self.listener.accept() {
                Ok((stream, addr)) => self.admit(stream, addr),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(error = %e, "Accept failed");
                    return;
                }
            }
        }
    }

    fn admit(&mut self, stream: TcpStream, addr: SocketAddr) {
        // Accepted mio streams are already non-blocking.
        if let Err(e) = stream.set_nodelay(true) {
            debug!(%addr, error = %e, "Failed to set TCP_NODELAY");
        }

        let (id, session) = self.matrix.open_session(Some(addr));
        let mut conn = Connection::new(stream, addr, id, session);
        if let Err(e) = conn.register(self.poll.registry()) {
            warn!(%addr, error = %e, "Failed to register connection");
            self.matrix.disconnect(id, "Registration failed");
            return;
        }

        self.connections.insert(conn.token(), conn);
        info!(session = %id, %addr, "Client connected");
        send_welcome(&self.matrix, id);
    }

    // ========================================================================
    // Read path
    // ========================================================================

    fn read_connection(&mut self, token: Token, buf: &mut [u8]) {
        let Some(conn) = self.connections.get_mut(&token) else {
            return;
        };
        let id = conn.id();
        let session = Arc::clone(conn.session());
        let matrix = &self.matrix;
        let registry = &self.registry;

        let outcome = conn.read_available(buf, |chunk| {
            session.lock().append_input(chunk);
            process_lines(matrix, registry, id, &session)
        });

        match outcome {
            ReadOutcome::Drained => {}
            ReadOutcome::Closed => self.matrix.request_close(id, "Connection closed"),
            ReadOutcome::Failed(e) => {
                debug!(session = %id, error = %e, "Read failed");
                self.matrix.request_close(id, format!("Read error: {e}"));
            }
        }
    }

    // ========================================================================
    // Write path and teardown
    // ========================================================================

    /// Flush dirty sessions and carry out close requests until both queues
    /// are empty. Closing can queue PARTs for others, hence the loop.
    fn settle(&mut self) {
        loop {
            let closing = self.matrix.take_close_requests();
            let dirty = self.matrix.take_dirty();
            if closing.is_empty() && dirty.is_empty() {
                return;
            }
            for (id, reason) in closing {
                self.close_session(id, &reason);
            }
            for id in dirty {
                self.flush_connection(Token(id.raw()));
            }
        }
    }

    fn flush_connection(&mut self, token: Token) {
        let Some(conn) = self.connections.get_mut(&token) else {
            return;
        };
        let result = match conn.flush() {
            Ok(drained) => conn.update_interest(self.poll.registry(), drained),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            let id = conn.id();
            debug!(session = %id, error = %e, "Write failed");
            self.matrix.request_close(id, format!("Write error: {e}"));
        }
    }

    /// Tear a session down. Safe to call more than once for the same id.
    fn close_session(&mut self, id: SessionId, reason: &str) {
        self.matrix.disconnect(id, reason);

        let Some(mut conn) = self.connections.remove(&Token(id.raw())) else {
            return;
        };
        // Best effort: the closing line (e.g. ERROR) may still be queued.
        if let Err(e) = conn.flush() {
            debug!(session = %id, error = %e, "Final flush failed");
        }
        if let Err(e) = conn.deregister(self.poll.registry()) {
            debug!(session = %id, error = %e, "Deregister failed");
        }
        info!(session = %id, addr = %conn.addr(), reason = %reason, "Client disconnected");
    }

    // ========================================================================
    // Control
    // ========================================================================

    /// Handle queued control messages. Returns true on shutdown.
    fn drain_control(&mut self) -> bool {
        loop {
            match self.control_rx.try_recv() {
                Ok(Control::Announce(text)) => self.announce(&text),
                Ok(Control::Shutdown) => {
                    self.close_all("Server shutting down");
                    return true;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return false,
            }
        }
    }

    fn announce(&self, text: &str) {
        let server = self.matrix.server_name();
        let ids = self.matrix.user_manager.session_ids();
        for id in &ids {
            let nick = self.matrix.nick_of(*id);
            self.matrix.send_to(*id, &Reply::notice(server, &nick, text));
        }
        info!(recipients = ids.len(), "Announcement queued");
    }

    fn close_all(&mut self, reason: &str) {
        let ids: Vec<SessionId> = self.connections.values().map(Connection::id).collect();
        for id in ids {
            self.close_session(id, reason);
        }
    }
}

// ============================================================================
// Line processing
// ============================================================================

/// Frame, parse and dispatch every complete line buffered for a session.
///
/// Returns false once the session is closing, so the caller stops reading.
fn process_lines(matrix: &Matrix, registry: &Registry, id: SessionId, session: &SessionRef) -> bool {
    loop {
        let next = {
            let mut s = session.lock();
            if s.is_closing() {
                return false;
            }
            s.next_line()
        };

        match next {
            None => return true,
            Some(Ok(line)) => handle_line(matrix, registry, id, &line),
            Some(Err(e)) => {
                warn!(session = %id, error = %e, "Inbound line rejected");
                let reply = Reply::numeric(matrix.server_name(), Response::ERR_INPUTTOOLONG, &matrix.nick_of(id))
                    .trailing("Input line was too long");
                matrix.send_to(id, &reply);
            }
        }
    }
}

fn handle_line(matrix: &Matrix, registry: &Registry, id: SessionId, line: &str) {
    match Message::parse(line) {
        Ok(msg) => {
            let mut ctx = Context::new(id, matrix);
            // Errors were already answered by the registry.
            let _ = registry.dispatch(&mut ctx, &msg);
        }
        Err(e) => {
            warn!(session = %id, error = %e, code = e.error_code(), "Malformed line");
            let notice = Reply::notice(matrix.server_name(), &matrix.nick_of(id), "Invalid message format");
            matrix.send_to(id, &notice);
        }
    }
}
