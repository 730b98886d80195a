// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Server-side multi-threaded handler: glues the accept loop's connection
//! contexts onto a [`WorkerPool`] driving a [`ContentStore`].

use std::sync::Arc;

use tracing::warn;

use crate::{
    codec::{Response, Status},
    connection::ConnectionContext,
    content_store::ContentStore,
    pool::WorkerPool,
};

/// One unit of server-side work: an accepted, header-parsed connection and
/// the path it asked for.
pub struct HandlerTask {
    pub ctx: ConnectionContext,
    pub path: String,
}

/// Starts a worker pool of `num_workers` threads, each serving
/// [`HandlerTask`]s against a shared [`ContentStore`].
pub fn start_handler_pool(
    num_workers: usize,
    store: Arc<dyn ContentStore>,
) -> WorkerPool<HandlerTask> {
    WorkerPool::start(
        num_workers,
        |task: HandlerTask, _worker_data: &mut (), store: &Arc<dyn ContentStore>| {
            serve_one(task, store.as_ref());
        },
        |_global: &Arc<dyn ContentStore>| (),
        store,
    )
}

fn serve_one(task: HandlerTask, store: &dyn ContentStore) {
    let HandlerTask { mut ctx, path } = task;

    let Some((mut source, size)) = store.open(&path) else {
        if let Err(e) = ctx.send_header(Response {
            status: Status::FileNotFound,
            size: 0,
        }) {
            warn!(error = %e, "failed to send FILE_NOT_FOUND header");
        }
        return;
    };

    if let Err(e) = ctx.send_header(Response {
        status: Status::Ok,
        size,
    }) {
        warn!(error = %e, "failed to send OK header");
        return;
    }

    let mut buf = [0u8; 8192];
    let mut sent = 0u64;
    while sent < size {
        let remaining = (size - sent).min(buf.len() as u64) as usize;
        let n = match source.read(&mut buf[..remaining]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "source read failed mid-transfer");
                ctx.abort();
                return;
            }
        };
        if let Err(e) = ctx.send(&buf[..n]) {
            warn!(error = %e, "send failed mid-transfer");
            return;
        }
        sent += n as u64;
    }

    if let Err(e) = source.finish() {
        warn!(error = %e, "source finish failed");
    }
}
