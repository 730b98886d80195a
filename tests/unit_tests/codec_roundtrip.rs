// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use getfile_rs::{
    codec::{self, RequestGet, Response, Status},
    tokenizer::Tokenizer,
};
use rand::Rng;

fn random_path(rng: &mut impl Rng, segments: usize) -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_-.";
    let mut path = String::new();
    for _ in 0..segments {
        path.push('/');
        let len = rng.random_range(1..=12);
        for _ in 0..len {
            let c = ALPHABET[rng.random_range(0..ALPHABET.len())] as char;
            path.push(c);
        }
    }
    path
}

#[test]
fn request_roundtrips_for_random_paths() {
    let mut rng = rand::rng();
    for _ in 0..256 {
        let path = random_path(&mut rng, rng.random_range(1..=5));
        let req = RequestGet { path: path.clone() };
        let bytes = codec::serialize_request(&req);
        let mut tok = Tokenizer::new();
        tok.process(bytes.as_bytes());
        assert_eq!(codec::parse_request(&tok).unwrap(), req, "path {path:?}");
    }
}

#[test]
fn response_roundtrips_for_random_sizes_and_statuses() {
    let mut rng = rand::rng();
    let statuses = [Status::Ok, Status::FileNotFound, Status::Error, Status::Invalid];
    for _ in 0..256 {
        let status = statuses[rng.random_range(0..statuses.len())];
        let size = if status == Status::Ok {
            rng.random_range(0..=u64::from(u32::MAX))
        } else {
            0
        };
        let resp = Response { status, size };
        let bytes = codec::serialize_response(&resp);
        let mut tok = Tokenizer::new();
        tok.process(bytes.as_bytes());
        assert_eq!(codec::parse_response(&tok).unwrap(), resp);
    }
}

#[test]
fn chunked_3_byte_feed_matches_whole_feed_for_random_requests() {
    let mut rng = rand::rng();
    for _ in 0..64 {
        let path = random_path(&mut rng, rng.random_range(1..=4));
        let bytes = codec::serialize_request(&RequestGet { path });

        let mut whole = Tokenizer::new();
        whole.process(bytes.as_bytes());

        let mut chunked = Tokenizer::new();
        for chunk in bytes.as_bytes().chunks(3) {
            if chunked.done() || chunked.invalid() {
                break;
            }
            chunked.process(chunk);
        }

        assert_eq!(whole.tokens(), chunked.tokens());
        assert_eq!(whole.done(), chunked.done());
    }
}
