// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Filesystem-backed [`Sink`]/[`Source`], matching
//! `examples/original_source/transfer/test/{FileSinkPtr,FileSourcePtr}.hpp`:
//! create parent directories on demand, unlink on cancel, plain `finish` on
//! success.

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use super::{Sink, SinkOpener, Source};

pub struct FileSink {
    path: PathBuf,
    file: BufWriter<File>,
}

impl FileSink {
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)?;
        Ok(FileSink {
            path,
            file: BufWriter::new(file),
        })
    }
}

impl Sink for FileSink {
    fn send(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn cancel(mut self: Box<Self>) {
        let _ = self.file.flush();
        let _ = fs::remove_file(&self.path);
    }

    fn finish(mut self: Box<Self>) -> io::Result<()> {
        self.file.flush()
    }
}

/// Opens a [`FileSink`] rooted at a fixed base directory, joining the
/// caller-supplied destination name onto it. Used by the downloader, whose
/// tasks name a `local_path` relative to the current working directory.
pub struct FileSinkOpener {
    root: PathBuf,
}

impl FileSinkOpener {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileSinkOpener { root: root.into() }
    }
}

impl SinkOpener for FileSinkOpener {
    fn open(&self, destination: &str) -> Option<Box<dyn Sink>> {
        FileSink::create(self.root.join(destination))
            .ok()
            .map(|s| Box::new(s) as Box<dyn Sink>)
    }
}

pub struct FileSource {
    file: BufReader<File>,
}

impl FileSource {
    /// Opens `path` for reading, also returning its size in bytes.
    pub fn open(path: impl AsRef<Path>) -> io::Result<(Self, u64)> {
        let file = File::open(path.as_ref())?;
        let size = file.metadata()?.len();
        Ok((
            FileSource {
                file: BufReader::new(file),
            },
            size,
        ))
    }
}

impl Source for FileSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }

    fn finish(self: Box<Self>) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn file_sink_creates_parent_dirs_and_writes() {
        let dir = tempdir().expect("test");
        let target = dir.path().join("nested/out.bin");
        let mut sink = FileSink::create(&target).expect("test");
        sink.send(b"hello").expect("test");
        Sink::finish(Box::new(sink)).expect("test");
        assert_eq!(fs::read(&target).expect("test"), b"hello");
    }

    #[test]
    fn file_sink_cancel_removes_file() {
        let dir = tempdir().expect("test");
        let target = dir.path().join("out.bin");
        let mut sink = FileSink::create(&target).expect("test");
        sink.send(b"partial").expect("test");
        Sink::cancel(Box::new(sink));
        assert!(!target.exists());
    }

    #[test]
    fn file_source_reports_size_and_reads_back() {
        let dir = tempdir().expect("test");
        let target = dir.path().join("in.bin");
        fs::write(&target, b"0123456789").expect("test");
        let (mut src, size) = FileSource::open(&target).expect("test");
        assert_eq!(size, 10);
        let mut buf = [0u8; 32];
        let n = src.read(&mut buf).expect("test");
        assert_eq!(&buf[..n], b"0123456789");
    }
}
