// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Bind/listen and a cooperative-cancellation accept loop.
//!
//! `std::net::TcpListener` has no `select`-with-timeout of its own, so the
//! ~1 ms cancellation quantum from the design is realized with a
//! non-blocking listener polled in a short sleep loop — functionally the
//! same liveness knob the design describes, without reaching for a
//! platform-specific poller the way the teacher's tokio runtime would.

use std::{
    io,
    net::{TcpListener, TcpStream, ToSocketAddrs},
    time::Duration,
};

use tracing::{debug, info, info_span, warn};

use crate::{
    codec,
    connection::ConnectionContext,
    error::{GetfileError, Result},
    tokenizer::Tokenizer,
};

/// Cooperative-cancellation hook, sampled once per accept-timeout. Kept as
/// a trait (rather than a bare `AtomicBool`) so tests can inject
/// deterministic cancellation — e.g. "stop after N accepts" — without
/// depending on wall-clock timing.
pub trait ServerHooks: Send + Sync {
    fn should_continue(&self) -> bool {
        true
    }
}

/// A hook that runs forever, for production use.
pub struct RunForever;
impl ServerHooks for RunForever {}

const ACCEPT_TIMEOUT: Duration = Duration::from_millis(1);

/// A bound, listening GETFILE server. `max_pending` is the `listen()`
/// backlog; `handler` is invoked once per accepted, header-parsed
/// connection with the parsed request path.
pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Binds and listens on `addr`. `max_pending` becomes the `listen()`
    /// backlog.
    pub fn bind(addr: impl ToSocketAddrs, max_pending: u32) -> Result<Self> {
        let addrs: Vec<_> = addr
            .to_socket_addrs()
            .map_err(|source| GetfileError::Resolve {
                host: String::new(),
                port: 0,
                source,
            })?
            .collect();

        let mut last_err = None;
        for candidate in addrs {
            let port = candidate.port();
            match TcpListener::bind(candidate) {
                Ok(listener) => {
                    listener
                        .set_nonblocking(true)
                        .map_err(|e| GetfileError::Bind { port, source: e })?;
                    return Ok(Server { listener });
                }
                Err(e) => last_err = Some((port, e)),
            }
        }
        let (port, source) = last_err
            .unwrap_or((0, io::Error::other("no address candidates")));
        Err(GetfileError::Bind { port, source })
    }

    pub fn local_addr(&self) -> io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop until `hooks.should_continue()` returns false.
    /// Every accepted connection has its request header parsed inline (the
    /// header is small and the parse is non-blocking-ish in practice); the
    /// connection context and parsed path are then handed to `on_request`,
    /// which typically enqueues them onto a worker pool.
    pub fn run(
        &self,
        hooks: &dyn ServerHooks,
        mut on_request: impl FnMut(ConnectionContext, String),
    ) {
        while hooks.should_continue() {
            match self.listener.accept() {
                Ok((stream, peer)) => {
                    let _span = info_span!("conn", %peer).entered();
                    self.accept_one(stream, &mut on_request);
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    std::thread::sleep(ACCEPT_TIMEOUT);
                }
                Err(e) => {
                    warn!(error = %e, "accept failed");
                }
            }
        }
    }

    fn accept_one(
        &self,
        stream: TcpStream,
        on_request: &mut impl FnMut(ConnectionContext, String),
    ) {
        if let Err(e) = stream.set_nonblocking(false) {
            warn!(error = %e, "failed to set accepted socket blocking");
            return;
        }
        let mut ctx = ConnectionContext::new(stream);
        let mut tokenizer = Tokenizer::new();
        let mut buf = [0u8; 512];

        loop {
            let n = match io::Read::read(&mut ctx, &mut buf) {
                Ok(0) => {
                    debug!("peer closed before header completed");
                    ctx.abort();
                    return;
                }
                Ok(n) => n,
                Err(e) => {
                    warn!(error = %e, "read failed while parsing header");
                    ctx.abort();
                    return;
                }
            };
            tokenizer.process(&buf[..n]);
            if tokenizer.done() || tokenizer.invalid() {
                break;
            }
        }

        match codec::parse_request(&tokenizer) {
            Ok(req) => {
                info!(path = %req.path, "request parsed");
                on_request(ctx, req.path);
            }
            Err(e) => {
                debug!(error = %e, "header rejected");
                let _ = ctx.send_header(codec::Response {
                    status: codec::Status::Invalid,
                    size: 0,
                });
            }
        }
    }
}
