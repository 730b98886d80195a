// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! `gfclient`: issues a single GETFILE request and writes the body to a
//! local file.

use anyhow::{Context, Result};
use clap::Parser;
use getfile_rs::{
    cfg::{cli::ClientArgs, config::ClientConfig, logger},
    client_request,
    codec::RequestGet,
    transfer::FileSink,
};
use tracing::info;

fn main() -> Result<()> {
    let args = ClientArgs::parse();
    let _guard =
        logger::init_logger(args.log_format, &args.log_level).context("logger init failed")?;
    let cfg = ClientConfig::from_args(args).context("invalid client configuration")?;

    let sink = FileSink::create(&cfg.output)
        .with_context(|| format!("failed to open output file {:?}", cfg.output))?;
    let req = RequestGet {
        path: cfg.path.clone(),
    };

    let outcome = client_request::perform_request(
        (cfg.server.as_str(), cfg.port),
        &req,
        Box::new(sink),
        None,
    )
    .context("request failed")?;

    info!(
        path = %cfg.path,
        output = %cfg.output,
        status = ?outcome.status,
        bytes = outcome.bytes_received,
        "download complete"
    );
    Ok(())
}
