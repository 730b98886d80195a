// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Plain config structs bound to the CLI surface, validated the way
//! `Config::validate_and_normalize` validates iSCSI login parameters: fail
//! fast with a descriptive `ensure!` rather than letting a bad value surface
//! deep inside the worker pool.

use anyhow::{Result, ensure};

use crate::cfg::cli::{ClientArgs, DownloadArgs, ServerArgs};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub max_pending: usize,
    pub threads: usize,
    pub root: String,
}

impl ServerConfig {
    pub fn from_args(args: ServerArgs) -> Result<Self> {
        let cfg = ServerConfig {
            port: args.port,
            max_pending: args.max_pending,
            threads: args.threads,
            root: args.root,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.threads >= 1, "--threads must be >= 1");
        ensure!(self.max_pending >= 1, "--max-pending must be >= 1");
        ensure!(
            std::path::Path::new(&self.root).is_dir(),
            "--root {:?} is not a directory",
            self.root
        );
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server: String,
    pub port: u16,
    pub path: String,
    pub output: String,
}

impl ClientConfig {
    pub fn from_args(args: ClientArgs) -> Result<Self> {
        let output = args.output.clone().unwrap_or_else(|| {
            args.path
                .rsplit('/')
                .next()
                .filter(|s| !s.is_empty())
                .unwrap_or("gfclient_output")
                .to_owned()
        });
        let cfg = ClientConfig {
            server: args.server,
            port: args.port,
            path: args.path,
            output,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        ensure!(!self.server.is_empty(), "--server must not be empty");
        ensure!(
            self.path.starts_with('/'),
            "--path must begin with '/', got {:?}",
            self.path
        );
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DownloadConfig {
    pub server: String,
    pub port: u16,
    pub workload_path: String,
    pub threads: usize,
    pub requests: Option<usize>,
}

impl DownloadConfig {
    pub fn from_args(args: DownloadArgs) -> Result<Self> {
        let cfg = DownloadConfig {
            server: args.server,
            port: args.port,
            workload_path: args.workload_path,
            threads: args.threads,
            requests: args.requests,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        ensure!(!self.server.is_empty(), "--server must not be empty");
        ensure!(self.threads >= 1, "--threads must be >= 1");
        ensure!(
            std::path::Path::new(&self.workload_path).is_file(),
            "--workload-path {:?} is not a file",
            self.workload_path
        );
        Ok(())
    }
}

/// One parsed line of a downloader workload file: `request_path[,local_name]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadEntry {
    pub req_path: String,
    pub local_path: String,
}

/// Reads the whole workload file into memory, parses, and validates before
/// any worker starts — a malformed workload file is a fatal startup error,
/// not a per-line runtime failure.
pub fn load_workload(path: &str) -> Result<Vec<WorkloadEntry>> {
    let content = std::fs::read_to_string(path)?;
    let mut entries = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (req_path, local_path) = match line.split_once(',') {
            Some((p, l)) => (p.trim().to_owned(), l.trim().to_owned()),
            None => {
                let local = line.rsplit('/').next().unwrap_or(line).to_owned();
                (line.to_owned(), local)
            }
        };
        ensure!(
            req_path.starts_with('/'),
            "workload line {}: request path {:?} must begin with '/'",
            lineno + 1,
            req_path
        );
        ensure!(
            !local_path.is_empty(),
            "workload line {}: local path must not be empty",
            lineno + 1
        );
        entries.push(WorkloadEntry {
            req_path,
            local_path,
        });
    }
    Ok(entries)
}
