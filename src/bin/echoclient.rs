// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! `echoclient`: sends one message to an echo server and prints what comes
//! back.

use anyhow::{Context, Result};
use clap::Parser;
use getfile_rs::echo::client::echo_once;

#[derive(Debug, Parser)]
#[command(name = "echoclient", about = "Fixed-buffer echo client")]
struct Args {
    #[arg(short = 's', long)]
    server: String,

    #[arg(short = 'p', long)]
    port: u16,

    /// Message to send; read as UTF-8 bytes.
    #[arg(short = 'm', long)]
    message: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let received = echo_once((args.server.as_str(), args.port), args.message.as_bytes())
        .context("echo request failed")?;
    println!("{}", String::from_utf8_lossy(&received));
    Ok(())
}
