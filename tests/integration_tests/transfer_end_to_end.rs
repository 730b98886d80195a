// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use getfile_rs::{client_request, codec::RequestGet, transfer::FileSink};
use rand::RngCore;

use crate::integration_tests::common::TestServer;

/// Downloads `path` from `server` into a fresh temp file and returns its
/// contents, so each test can assert byte-for-byte identity rather than
/// just a matching length.
fn download_to_bytes(server: &TestServer, path: &str) -> Vec<u8> {
    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("downloaded");
    let sink = FileSink::create(&out_path).unwrap();

    let req = RequestGet {
        path: path.to_owned(),
    };
    let outcome =
        client_request::perform_request(server.addr, &req, Box::new(sink), None).unwrap();
    assert_eq!(outcome.status, getfile_rs::codec::Status::Ok);
    assert_eq!(outcome.bytes_received, outcome.filelen);

    std::fs::read(&out_path).unwrap()
}

#[test]
fn empty_body_roundtrips() {
    let server = TestServer::start(2, &[("/empty", b"")]);
    assert_eq!(download_to_bytes(&server, "/empty"), Vec::<u8>::new());
}

#[test]
fn ten_zero_bytes_roundtrips() {
    let body = vec![0u8; 10];
    let server = TestServer::start(2, &[("/zeros", &body)]);
    assert_eq!(download_to_bytes(&server, "/zeros"), body);
}

#[test]
fn one_mebibyte_random_body_roundtrips() {
    let mut body = vec![0u8; 1024 * 1024];
    rand::rng().fill_bytes(&mut body);
    let server = TestServer::start(2, &[("/big", &body)]);
    assert_eq!(download_to_bytes(&server, "/big"), body);
}
