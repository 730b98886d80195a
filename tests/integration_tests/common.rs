// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{net::SocketAddr, sync::Arc, thread};

use getfile_rs::{
    content_store::FsContentStore,
    handler::{self, HandlerTask},
    server::{RunForever, Server},
};
use tempfile::TempDir;

/// A running server bound to an ephemeral port, backed by a content store
/// rooted at a scratch directory. Dropping this stops nothing by itself —
/// the accept thread and worker pool run until the process exits, which is
/// fine for a test binary.
pub struct TestServer {
    pub addr: SocketAddr,
    pub root: TempDir,
}

impl TestServer {
    /// Starts a server with `threads` workers. `files` is `(request_path,
    /// content)` pairs written under the scratch root before the server
    /// starts accepting.
    pub fn start(threads: usize, files: &[(&str, &[u8])]) -> Self {
        let root = tempfile::tempdir().unwrap();
        for (path, content) in files {
            let relative = path.strip_prefix('/').unwrap_or(path);
            let full = root.path().join(relative);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(full, content).unwrap();
        }

        let server = Server::bind("127.0.0.1:0", 128).unwrap();
        let addr = server.local_addr().unwrap();
        let store = Arc::new(FsContentStore::new(root.path()));
        let pool = handler::start_handler_pool(threads, store);

        thread::spawn(move || {
            server.run(&RunForever, |ctx, path| {
                pool.submit(HandlerTask { ctx, path });
            });
        });

        TestServer { addr, root }
    }
}
