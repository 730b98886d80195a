// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Maps a request path to a byte source. Out of scope for the core design
//! (spec.md calls the oracle an external collaborator) but a runnable
//! server needs one; grounded on `examples/original_source/gflib/gf-student.c`,
//! the reference oracle the original coursework plugs into its server.

use std::path::{Component, Path, PathBuf};

use crate::transfer::Source;

/// Resolves a GETFILE request path to a [`Source`] plus its size, or
/// `None` if the path has no content (the server maps that to
/// `FILE_NOT_FOUND` regardless of the underlying cause, per the error
/// design's "narrowing of the public error surface").
pub trait ContentStore: Send + Sync {
    fn open(&self, path: &str) -> Option<(Box<dyn Source>, u64)>;
}

/// Filesystem-backed oracle rooted at a configured directory. Rejects any
/// request path that would resolve outside the root — `..` components are
/// rejected outright rather than relying on `..`-normalization, since a
/// request path is also constrained by `RequestGet`'s "every byte is a word
/// character" invariant and `..` contains none, but defense in depth here
/// costs nothing and the original C oracle (test-injected, no real
/// filesystem root) didn't need to care.
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsContentStore { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = path.strip_prefix('/').unwrap_or(path);
        let candidate = self.root.join(relative);
        for component in Path::new(relative).components() {
            if matches!(component, Component::ParentDir | Component::RootDir) {
                return None;
            }
        }
        Some(candidate)
    }
}

impl ContentStore for FsContentStore {
    fn open(&self, path: &str) -> Option<(Box<dyn Source>, u64)> {
        let resolved = self.resolve(path)?;
        let (source, size) = crate::transfer::FileSource::open(&resolved).ok()?;
        Some((Box::new(source), size))
    }
}
