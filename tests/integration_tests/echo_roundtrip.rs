// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Echo server end-to-end: 4 buffer sizes, 1024 repetitions each, matching
//! the testable-properties section literally.

use std::thread;

use getfile_rs::echo::{EchoServer, echo_once};

#[test]
fn echo_truncates_to_max_message_length_1024_reps() {
    for &max_len in &[4usize, 16, 256, 4096] {
        let server = EchoServer::bind("127.0.0.1:0", max_len).unwrap();
        let addr = server.local_addr().unwrap();
        thread::spawn(move || server.run_forever());

        for _ in 0..1024 {
            let message = vec![b'm'; max_len * 2];
            let received = echo_once(addr, &message).unwrap();
            assert_eq!(received, message[..max_len]);
        }
    }
}
