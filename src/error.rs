// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The crate's unified error type.
//!
//! Library code returns [`GetfileError`]; binaries wrap the top-level call
//! with `anyhow::Context` the way a CLI front end normally does.

use thiserror::Error;

/// Errors surfaced by the core GETFILE components.
///
/// Each variant corresponds to one of the error kinds enumerated in the
/// error-handling design: resolve/bind/accept failures are fatal at
/// construction, parse/truncation failures are per-connection.
#[derive(Debug, Error)]
pub enum GetfileError {
    #[error("failed to resolve {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("bind/listen on port {port} failed: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("accept failed: {0}")]
    Accept(#[source] std::io::Error),

    #[error("header is malformed")]
    InvalidHeader,

    #[error("header parsed to an unexpected token shape")]
    UnexpectedTokens,

    #[error("connection closed before the header completed")]
    HeaderTruncated,

    #[error("server reported an error status")]
    ServerError,

    #[error("server reported the requested path was not found")]
    FileNotFound,

    #[error(
        "body truncated: expected {expected} bytes, received {received}"
    )]
    BodyTruncated { expected: u64, received: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sink/source session could not be opened")]
    SessionOpenFailed,
}

pub type Result<T> = std::result::Result<T, GetfileError>;
