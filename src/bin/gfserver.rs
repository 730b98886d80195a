// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! `gfserver`: binds a GETFILE server, resolves request paths against a
//! filesystem content store, and serves forever.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use getfile_rs::{
    cfg::{cli::ServerArgs, config::ServerConfig, logger},
    content_store::FsContentStore,
    handler::{self, HandlerTask},
    server::{RunForever, Server},
};
use tracing::info;

fn main() -> Result<()> {
    let args = ServerArgs::parse();
    let _guard =
        logger::init_logger(args.log_format, &args.log_level).context("logger init failed")?;
    let cfg = ServerConfig::from_args(args).context("invalid server configuration")?;

    let server =
        Server::bind(("0.0.0.0", cfg.port), cfg.max_pending as u32).context("bind failed")?;
    info!(addr = %server.local_addr()?, root = %cfg.root, threads = cfg.threads, "gfserver listening");

    let store = Arc::new(FsContentStore::new(cfg.root));
    let pool = handler::start_handler_pool(cfg.threads, store);

    server.run(&RunForever, |ctx, path| {
        pool.submit(HandlerTask { ctx, path });
    });

    Ok(())
}
