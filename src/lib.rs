// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! A table-driven tokenizer, worker pool, and streaming client/server for
//! the GETFILE file-transfer protocol.

/// Configuration, command-line parsing, and logging.
pub mod cfg;
/// Wire codec: request/response framing on top of the tokenizer.
pub mod codec;
/// Accepted-connection lifecycle: header-then-body discipline over a raw
/// `TcpStream`.
pub mod connection;
/// Content store abstraction the server resolves request paths against.
pub mod content_store;
/// Table-driven tokenizer construction: transition tables, column
/// compression, keyword tries.
pub mod dfa;
/// Trivial fixed-buffer echo server/client used as a concurrency smoke test.
pub mod echo;
/// Crate-wide error type.
pub mod error;
/// Server-side request handling, wired to a worker pool.
pub mod handler;
/// Client-side download workers for the batch downloader binary.
pub mod downloader;
/// Client-side single-request protocol driver.
pub mod client_request;
/// Bounded worker pool with a typed poison-pill sentinel.
pub mod pool;
/// Thread-safe blocking queue.
pub mod queue;
/// TCP accept loop and per-connection dispatch.
pub mod server;
/// Sink/Source abstractions for streaming request/response bodies.
pub mod transfer;
/// GETFILE keyword tokenizer built on the DFA transition table.
pub mod tokenizer;
