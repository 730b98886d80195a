// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! 16 worker threads, 1024 requests for the same 1023 KiB payload, every
//! sink ends with exactly the expected bytes.

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use getfile_rs::{
    client_request, codec::RequestGet, codec::Status, transfer::MemorySink,
};

use crate::integration_tests::common::TestServer;

#[test]
fn sixteen_threads_1024_requests_same_payload() {
    const PAYLOAD_LEN: usize = 1023 * 1024;
    const NUM_REQUESTS: usize = 1024;
    const NUM_CLIENT_THREADS: usize = 16;

    let payload = vec![b'v'; PAYLOAD_LEN];
    let server = TestServer::start(NUM_CLIENT_THREADS, &[("/payload", &payload)]);
    let addr = server.addr;

    let mismatches = Arc::new(AtomicUsize::new(0));
    let completed = Arc::new(AtomicUsize::new(0));

    let per_thread = NUM_REQUESTS / NUM_CLIENT_THREADS;
    let mut handles = Vec::new();
    for _ in 0..NUM_CLIENT_THREADS {
        let mismatches = Arc::clone(&mismatches);
        let completed = Arc::clone(&completed);
        handles.push(thread::spawn(move || {
            for _ in 0..per_thread {
                let req = RequestGet {
                    path: "/payload".to_owned(),
                };
                let sink = MemorySink::new();
                match client_request::perform_request(addr, &req, Box::new(sink), None) {
                    Ok(outcome) if outcome.status == Status::Ok
                        && outcome.bytes_received == PAYLOAD_LEN as u64 =>
                    {
                        completed.fetch_add(1, Ordering::Relaxed);
                    }
                    _ => {
                        mismatches.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(mismatches.load(Ordering::Relaxed), 0);
    assert_eq!(completed.load(Ordering::Relaxed), NUM_REQUESTS);
}
