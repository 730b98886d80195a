// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! `echoserver`: a trivial fixed-buffer echo service, used as a
//! concurrency smoke test independent of the GETFILE protocol.

use anyhow::{Context, Result};
use clap::Parser;
use getfile_rs::echo::server::EchoServer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "echoserver", about = "Fixed-buffer echo server")]
struct Args {
    #[arg(short = 'p', long)]
    port: u16,

    #[arg(short = 'm', long, default_value_t = 4096)]
    max_message_length: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let server = EchoServer::bind(("0.0.0.0", args.port), args.max_message_length)
        .context("bind failed")?;
    info!(addr = ?server.local_addr()?, "echoserver listening");
    server.run_forever();
    Ok(())
}
