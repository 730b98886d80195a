// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Command-line surface for the three binaries, per the external-interfaces
//! design. `clap` derive, matching the teacher's preference for typed
//! argument structs over hand-rolled parsing.

use clap::{Parser, ValueEnum};

/// Chosen log rendering. `Human` for a terminal, `Json` for ingestion by a
/// log pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Human,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "gfserver", about = "GETFILE protocol server")]
pub struct ServerArgs {
    /// TCP port to listen on.
    #[arg(short = 'p', long)]
    pub port: u16,

    /// Listen backlog.
    #[arg(short = 'm', long, default_value_t = 128)]
    pub max_pending: usize,

    /// Worker pool size.
    #[arg(short = 't', long, default_value_t = 8)]
    pub threads: usize,

    /// Directory the content store resolves request paths against.
    #[arg(short = 'r', long, default_value = ".")]
    pub root: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Human)]
    pub log_format: LogFormat,

    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Parser)]
#[command(name = "gfclient", about = "GETFILE protocol single-request client")]
pub struct ClientArgs {
    /// Server hostname or address.
    #[arg(short = 's', long)]
    pub server: String,

    #[arg(short = 'p', long)]
    pub port: u16,

    /// Request path, e.g. `/a/b/c`.
    #[arg(short = 'w', long = "path")]
    pub path: String,

    /// Local file to write the body to; defaults to the last path segment.
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    #[arg(long, value_enum, default_value_t = LogFormat::Human)]
    pub log_format: LogFormat,

    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Parser)]
#[command(
    name = "gfclient_download",
    about = "GETFILE protocol multi-threaded batch downloader"
)]
pub struct DownloadArgs {
    #[arg(short = 's', long)]
    pub server: String,

    #[arg(short = 'p', long)]
    pub port: u16,

    /// Path to a workload file: one `request_path[,local_name]` pair per
    /// line.
    #[arg(short = 'w', long = "workload-path")]
    pub workload_path: String,

    #[arg(short = 't', long, default_value_t = 8)]
    pub threads: usize,

    /// Number of requests to issue; defaults to the full workload, once.
    #[arg(short = 'n', long)]
    pub requests: Option<usize>,

    #[arg(long, value_enum, default_value_t = LogFormat::Human)]
    pub log_format: LogFormat,

    #[arg(long, default_value = "info")]
    pub log_level: String,
}
