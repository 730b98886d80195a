// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Trivial echo client: connect, send a message, read until close.

use std::{
    io::{Read, Write},
    net::{TcpStream, ToSocketAddrs},
};

use crate::error::{GetfileError, Result};

/// Sends `message`, shuts down the write side, then reads until the peer
/// closes. Returns whatever bytes came back.
pub fn echo_once(addr: impl ToSocketAddrs, message: &[u8]) -> Result<Vec<u8>> {
    let mut stream = TcpStream::connect(addr).map_err(|source| GetfileError::Resolve {
        host: String::new(),
        port: 0,
        source,
    })?;
    stream.write_all(message)?;
    stream.shutdown(std::net::Shutdown::Write)?;

    let mut received = Vec::new();
    stream.read_to_end(&mut received)?;
    Ok(received)
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::echo::server::EchoServer;

    #[test]
    fn echo_truncates_to_max_message_length() {
        for &max_len in &[4usize, 16, 256, 4096] {
            let server = EchoServer::bind("127.0.0.1:0", max_len).expect("test");
            let addr = server.local_addr().expect("test");
            thread::spawn(move || server.run_forever());

            for _ in 0..8 {
                let message = vec![b'm'; max_len * 2];
                let received = echo_once(addr, &message).expect("test");
                assert_eq!(received, message[..max_len]);
            }
        }
    }
}
