// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Fixed-buffer echo server: reads up to `max_message_length` bytes from
//! each connection and writes them straight back, then closes.

use std::{
    io::{Read, Write},
    net::{TcpListener, TcpStream, ToSocketAddrs},
    thread,
};

use tracing::warn;

use crate::error::{GetfileError, Result};

pub struct EchoServer {
    listener: TcpListener,
    max_message_length: usize,
}

impl EchoServer {
    pub fn bind(addr: impl ToSocketAddrs, max_message_length: usize) -> Result<Self> {
        let listener =
            TcpListener::bind(addr).map_err(|source| GetfileError::Bind { port: 0, source })?;
        Ok(EchoServer {
            listener,
            max_message_length,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections forever, spawning one thread per connection —
    /// the echo service is a teaching component, not part of the worker
    /// pool's concurrency model under test here.
    pub fn run_forever(&self) {
        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    let max = self.max_message_length;
                    thread::spawn(move || handle_one(stream, max));
                }
                Err(e) => warn!(error = %e, "echo accept failed"),
            }
        }
    }
}

fn handle_one(mut stream: TcpStream, max_message_length: usize) {
    let mut buf = vec![0u8; max_message_length];
    let mut total = 0usize;
    loop {
        if total >= max_message_length {
            break;
        }
        match stream.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) => {
                warn!(error = %e, "echo read failed");
                return;
            }
        }
    }
    if let Err(e) = stream.write_all(&buf[..total]) {
        warn!(error = %e, "echo write failed");
    }
}
