// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Pluggable I/O endpoints for streaming transfers: a [`Sink`] (data-out)
//! and a [`Source`] (data-in), each with an in-memory implementation for
//! tests and a filesystem-backed one for production.
//!
//! Grounded on `examples/original_source/transfer/test/{ByteSink,ByteSource,FileSinkPtr,FileSourcePtr}.hpp`:
//! those headers model the same four-operation contract (start/send-or-read/
//! finish/cancel) as C++ abstract classes; here it is two traits with an
//! opaque associated session type, so neither caller nor implementor can
//! observe the session's internal shape.

pub mod file;
pub mod sink;
pub mod source;

pub use file::{FileSink, FileSinkOpener, FileSource};
pub use sink::{MemorySink, Sink, SinkOpener};
pub use source::{MemorySource, Source};
