// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Client-side multi-threaded downloader: glues a workload of
//! `(req_path, local_path)` pairs onto a [`WorkerPool`] driving
//! [`client_request::perform_request`].

use std::{net::SocketAddr, sync::Arc};

use tracing::{info, warn};

use crate::{
    client_request::{self, Outcome},
    codec::RequestGet,
    error::GetfileError,
    pool::WorkerPool,
    transfer::SinkOpener,
};

/// One unit of client-side work.
pub struct DownloadTask {
    pub req_path: String,
    pub local_path: String,
}

#[derive(Clone)]
struct Shared {
    server: SocketAddr,
    sink_opener: Arc<dyn SinkOpener>,
}

/// Failure detail reported for one task. Carries the expected/received byte
/// counts whenever the underlying error exposes them (a truncated body) so
/// a programmatic caller can observe them as numbers instead of reparsing
/// `message`.
#[derive(Debug, Clone)]
pub struct DownloadFailure {
    pub message: String,
    pub expected: Option<u64>,
    pub received: Option<u64>,
}

impl DownloadFailure {
    fn from_error(err: &GetfileError) -> Self {
        let (expected, received) = match err {
            GetfileError::BodyTruncated { expected, received } => {
                (Some(*expected), Some(*received))
            }
            _ => (None, None),
        };
        DownloadFailure {
            message: err.to_string(),
            expected,
            received,
        }
    }

    fn from_message(message: impl Into<String>) -> Self {
        DownloadFailure {
            message: message.into(),
            expected: None,
            received: None,
        }
    }
}

/// Outcome reported for one task, success or failure, for whatever
/// `report` the caller supplies (logging, a counter, a test assertion).
pub type Report = Box<dyn Fn(&str, Result<Outcome, DownloadFailure>) + Send + Sync>;

/// Starts a worker pool of `num_workers` threads downloading
/// [`DownloadTask`]s from `server` through `sink_opener`, calling `report`
/// once per task with its outcome.
pub fn start_downloader_pool(
    num_workers: usize,
    server: SocketAddr,
    sink_opener: Arc<dyn SinkOpener>,
    report: Report,
) -> WorkerPool<DownloadTask> {
    let shared = Shared {
        server,
        sink_opener,
    };
    let report = Arc::new(report);
    WorkerPool::start(
        num_workers,
        move |task: DownloadTask, _worker_data: &mut (), shared: &Shared| {
            download_one(task, shared, &report);
        },
        |_shared: &Shared| (),
        shared,
    )
}

fn download_one(task: DownloadTask, shared: &Shared, report: &Report) {
    let DownloadTask {
        req_path,
        local_path,
    } = task;

    let Some(sink) = shared.sink_opener.open(&local_path) else {
        warn!(local_path, "failed to open sink, dropping task");
        report(&req_path, Err(DownloadFailure::from_message("sink open failed")));
        return;
    };

    let req = RequestGet {
        path: req_path.clone(),
    };
    match client_request::perform_request(shared.server, &req, sink, None) {
        Ok(outcome) => {
            info!(path = %req_path, bytes = outcome.bytes_received, "download complete");
            report(&req_path, Ok(outcome));
        }
        Err(e) => {
            warn!(path = %req_path, error = %e, "download failed");
            report(&req_path, Err(DownloadFailure::from_error(&e)));
        }
    }
}
