// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! `gfclient_download`: drives a multi-threaded batch of GETFILE requests
//! read from a workload file against a single server.

use std::{
    net::ToSocketAddrs,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use getfile_rs::{
    cfg::{
        cli::DownloadArgs,
        config::{DownloadConfig, load_workload},
        logger,
    },
    downloader::{self, DownloadTask},
    transfer::FileSinkOpener,
};
use tracing::{error, info};

fn main() -> Result<()> {
    let args = DownloadArgs::parse();
    let _guard =
        logger::init_logger(args.log_format, &args.log_level).context("logger init failed")?;
    let cfg = DownloadConfig::from_args(args).context("invalid downloader configuration")?;

    let workload =
        load_workload(&cfg.workload_path).context("failed to load workload file")?;
    if workload.is_empty() {
        bail!("workload file {:?} contains no entries", cfg.workload_path);
    }

    let server = (cfg.server.as_str(), cfg.port)
        .to_socket_addrs()
        .with_context(|| format!("failed to resolve {}:{}", cfg.server, cfg.port))?
        .next()
        .with_context(|| format!("no address for {}:{}", cfg.server, cfg.port))?;

    let sink_opener = Arc::new(FileSinkOpener::new("."));
    let succeeded = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));
    let report_succeeded = Arc::clone(&succeeded);
    let report_failed = Arc::clone(&failed);

    let pool = downloader::start_downloader_pool(
        cfg.threads,
        server,
        sink_opener,
        Box::new(move |path, result| match result {
            Ok(outcome) => {
                info!(path, bytes = outcome.bytes_received, "ok");
                report_succeeded.fetch_add(1, Ordering::Relaxed);
            }
            Err(failure) => {
                error!(
                    path,
                    error = %failure.message,
                    expected = failure.expected,
                    received = failure.received,
                    "failed"
                );
                report_failed.fetch_add(1, Ordering::Relaxed);
            }
        }),
    );

    let total = cfg.requests.unwrap_or(workload.len());
    for i in 0..total {
        let entry = &workload[i % workload.len()];
        pool.submit(DownloadTask {
            req_path: entry.req_path.clone(),
            local_path: entry.local_path.clone(),
        });
    }
    pool.finish();

    info!(
        succeeded = succeeded.load(Ordering::Relaxed),
        failed = failed.load(Ordering::Relaxed),
        total,
        "batch complete"
    );
    if failed.load(Ordering::Relaxed) > 0 {
        bail!("{} of {} requests failed", failed.load(Ordering::Relaxed), total);
    }
    Ok(())
}
