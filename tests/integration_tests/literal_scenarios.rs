// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The three concrete scenarios, driven against a real [`Server`] rather
//! than the mock TCP listeners `client_request`'s own unit tests use.

use getfile_rs::{client_request, codec::RequestGet, error::GetfileError, transfer::MemorySink};

use crate::integration_tests::common::TestServer;

#[test]
fn scenario_1_full_transfer() {
    let blob = vec![b'q'; 1025];
    let server = TestServer::start(4, &[("/a/b/c/d/d", &blob)]);

    let req = RequestGet {
        path: "/a/b/c/d/d".to_owned(),
    };
    let sink = MemorySink::new();
    let outcome =
        client_request::perform_request(server.addr, &req, Box::new(sink), None).unwrap();

    assert_eq!(outcome.filelen, 1025);
    assert_eq!(outcome.bytes_received, 1025);
    assert_eq!(outcome.status, getfile_rs::codec::Status::Ok);
}

#[test]
fn scenario_2_file_not_found() {
    let server = TestServer::start(4, &[]);

    let req = RequestGet {
        path: "/missing".to_owned(),
    };
    let sink = MemorySink::new();
    let err =
        client_request::perform_request(server.addr, &req, Box::new(sink), None).unwrap_err();

    assert!(matches!(err, GetfileError::FileNotFound));
}
