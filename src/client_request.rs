// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Client-side request/response pipeline: connect, send the request
//! header, parse the response header, then stream the body (if any) into a
//! [`Sink`], tracking tail bytes carefully since the header and the start
//! of the body commonly arrive in the same `recv`.

use std::{
    io::{Read, Write},
    net::{TcpStream, ToSocketAddrs},
};

use tracing::debug;

use crate::{
    codec::{self, RequestGet, Response, Status},
    error::{GetfileError, Result},
    tokenizer::Tokenizer,
    transfer::Sink,
};

const SCRATCH_LEN: usize = 4096;

/// Outcome of a completed request, regardless of status — mirrors what the
/// three literal scenarios in the testable-properties section ask the
/// caller to observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub status: Status,
    pub filelen: u64,
    pub bytes_received: u64,
}

/// Performs one GETFILE request against `addr`, streaming any `Ok` body
/// into `sink`. `header_observer`, if given, receives the raw header bytes
/// once the header completes — purely informational.
pub fn perform_request(
    addr: impl ToSocketAddrs,
    req: &RequestGet,
    sink: Box<dyn Sink>,
    mut header_observer: Option<&mut dyn FnMut(&[u8])>,
) -> Result<Outcome> {
    let connect_result = TcpStream::connect(addr).map_err(|source| GetfileError::Resolve {
        host: String::new(),
        port: 0,
        source,
    });
    let mut stream = match connect_result {
        Ok(stream) => stream,
        Err(e) => {
            sink.cancel();
            return Err(e);
        }
    };

    macro_rules! fail {
        ($err:expr) => {{
            sink.cancel();
            return Err($err);
        }};
    }

    let header = codec::serialize_request(req);
    if let Err(e) = stream.write_all(header.as_bytes()) {
        fail!(GetfileError::Io(e));
    }

    let mut tokenizer = Tokenizer::new();
    let mut scratch = [0u8; SCRATCH_LEN];
    let mut tail: &[u8] = &[];

    loop {
        let n = match stream.read(&mut scratch) {
            Ok(n) => n,
            Err(e) => fail!(GetfileError::Io(e)),
        };
        if n == 0 {
            fail!(GetfileError::HeaderTruncated);
        }
        let consumed = tokenizer
            .process(&scratch[..n])
            .expect("tokenizer was not already terminal");
        if let Some(observer) = header_observer.as_deref_mut() {
            observer(&scratch[..consumed.n]);
        }
        if consumed.done || consumed.invalid {
            tail = &scratch[consumed.n..n];
            break;
        }
    }

    let response = match codec::parse_response(&tokenizer) {
        Ok(r) => r,
        Err(e) => fail!(e),
    };
    let Response { status, size } = response;

    if status != Status::Ok {
        fail!(match status {
            Status::FileNotFound => GetfileError::FileNotFound,
            Status::Error => GetfileError::ServerError,
            _ => GetfileError::InvalidHeader,
        });
    }

    let mut sink = sink;
    let mut received: u64 = 0;

    let tail_take = (size.saturating_sub(received)).min(tail.len() as u64) as usize;
    if tail_take > 0 {
        if let Err(e) = sink.send(&tail[..tail_take]) {
            fail!(GetfileError::Io(e));
        }
        received += tail_take as u64;
    }

    while received < size {
        let remaining = (size - received).min(scratch.len() as u64) as usize;
        let n = match stream.read(&mut scratch[..remaining]) {
            Ok(n) => n,
            Err(e) => fail!(GetfileError::Io(e)),
        };
        if n == 0 {
            debug!(received, size, "body truncated: peer closed early");
            fail!(GetfileError::BodyTruncated {
                expected: size,
                received,
            });
        }
        if let Err(e) = sink.send(&scratch[..n]) {
            fail!(GetfileError::Io(e));
        }
        received += n as u64;
    }

    sink.finish()?;

    Ok(Outcome {
        status,
        filelen: size,
        bytes_received: received,
    })
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread,
    };

    use super::*;
    use crate::transfer::MemorySink;

    fn spawn_mock_server(response: Vec<u8>) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").expect("test");
        let addr = listener.local_addr().expect("test");
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(&response);
            }
        });
        addr
    }

    #[test]
    fn scenario_file_not_found() {
        let addr = spawn_mock_server(b"GETFILE FILE_NOT_FOUND\r\n\r\n".to_vec());
        let req = RequestGet {
            path: "/missing".to_owned(),
        };
        let sink: Box<dyn Sink> = Box::new(MemorySink::new());
        let err = perform_request(addr, &req, sink, None).unwrap_err();
        assert!(matches!(err, GetfileError::FileNotFound));
    }

    #[test]
    fn scenario_truncated_body_reports_partial_progress() {
        let mut response = b"GETFILE OK 2\r\n\r\n".to_vec();
        response.push(b'X'); // one body byte, then the mock closes.
        let addr = spawn_mock_server(response);
        let req = RequestGet {
            path: "/x".to_owned(),
        };
        let sink: Box<dyn Sink> = Box::new(MemorySink::new());
        let err = perform_request(addr, &req, sink, None).unwrap_err();
        match err {
            GetfileError::BodyTruncated { expected, received } => {
                assert_eq!(expected, 2);
                assert_eq!(received, 1);
            }
            other => panic!("expected BodyTruncated, got {other:?}"),
        }
    }

    #[test]
    fn scenario_full_transfer() {
        let body = vec![b'z'; 1025];
        let mut response = b"GETFILE OK 1025\r\n\r\n".to_vec();
        response.extend_from_slice(&body);
        let addr = spawn_mock_server(response);
        let req = RequestGet {
            path: "/a/b/c/d/d".to_owned(),
        };
        let sink = MemorySink::new();
        let outcome =
            perform_request(addr, &req, Box::new(sink), None).expect("test");
        assert_eq!(outcome.status, Status::Ok);
        assert_eq!(outcome.filelen, 1025);
        assert_eq!(outcome.bytes_received, 1025);
    }
}
