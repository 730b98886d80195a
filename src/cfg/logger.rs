// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Logger initialization. Simplified from the teacher's YAML-driven,
//! multi-output JSON formatter down to the two formats a terminal-operated
//! GETFILE binary actually needs; the level still comes from `RUST_LOG`
//! when set, falling back to the CLI's `--log-level`.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cfg::cli::LogFormat;

/// Initializes the global `tracing` subscriber. Returns a [`WorkerGuard`]
/// that must be kept alive for the process's lifetime (dropping it flushes
/// and stops the non-blocking writer).
pub fn init_logger(format: LogFormat, level: &str) -> Result<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("failed to parse log level from RUST_LOG or --log-level")?;

    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Human => {
            registry
                .with(fmt::layer().with_writer(writer).with_target(false))
                .try_init()
                .context("failed to install tracing subscriber")?;
        }
        LogFormat::Json => {
            registry
                .with(fmt::layer().with_writer(writer).json())
                .try_init()
                .context("failed to install tracing subscriber")?;
        }
    }

    Ok(guard)
}
