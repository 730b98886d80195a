// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The per-connection state machine: `Fresh -> Active(expected, sent) ->
//! Closed`. Owns the accepted socket and enforces "send header before
//! body; body length matches header; socket closed by exactly one path."

use std::{
    io::{self, Read, Write},
    net::{Shutdown, TcpStream},
};

use tracing::debug;

use crate::codec::{self, Response, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Active { expected: u64, sent: u64 },
    Closed,
}

/// Owns one accepted socket for the lifetime of a single request/response
/// exchange. Constructed in `Fresh`; every path ends in `Closed`, at which
/// point the socket has been half-closed, drained, and closed exactly
/// once.
pub struct ConnectionContext {
    socket: TcpStream,
    state: State,
}

impl ConnectionContext {
    pub fn new(socket: TcpStream) -> Self {
        ConnectionContext {
            socket,
            state: State::Fresh,
        }
    }

    pub fn peer_addr(&self) -> io::Result<std::net::SocketAddr> {
        self.socket.peer_addr()
    }

    /// `Fresh -> Active(size, 0)` on `Ok`; `Fresh -> Closed` on any other
    /// status (the socket is shut down and drained immediately, since a
    /// non-`Ok` header carries no body).
    pub fn send_header(&mut self, resp: Response) -> io::Result<()> {
        debug_assert_eq!(self.state, State::Fresh, "send_header called twice");
        let bytes = codec::serialize_response(&resp);
        let write_result = self.socket.write_all(bytes.as_bytes());
        match (resp.status, write_result) {
            (Status::Ok, Ok(())) => {
                self.state = State::Active {
                    expected: resp.size,
                    sent: 0,
                };
                Ok(())
            }
            (_, Ok(())) => {
                self.close();
                Ok(())
            }
            (_, Err(e)) => {
                self.close();
                Err(e)
            }
        }
    }

    /// Writes `buf` as part of the body. Requires `Active`; transitions to
    /// `Closed` once `sent == expected`.
    pub fn send(&mut self, buf: &[u8]) -> io::Result<()> {
        let State::Active { expected, sent } = self.state else {
            panic!("send called outside Active state");
        };
        debug_assert!(sent + buf.len() as u64 <= expected, "body overrun");
        let result = self.socket.write_all(buf);
        match result {
            Ok(()) => {
                let sent = sent + buf.len() as u64;
                self.state = State::Active { expected, sent };
                if sent == expected {
                    self.close();
                }
                Ok(())
            }
            Err(e) => {
                self.close();
                Err(e)
            }
        }
    }

    /// Transitions to `Closed` from any state, skipping any further body.
    pub fn abort(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        if self.state == State::Closed {
            return;
        }
        let _ = self.socket.shutdown(Shutdown::Write);
        let mut sink = [0u8; 4096];
        loop {
            match self.socket.read(&mut sink) {
                Ok(0) | Err(_) => break,
                Ok(_) => continue,
            }
        }
        debug!("connection closed");
        self.state = State::Closed;
    }
}

impl Drop for ConnectionContext {
    fn drop(&mut self) {
        self.close();
    }
}

impl Read for ConnectionContext {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.socket.read(buf)
    }
}
