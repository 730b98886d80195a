// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Trivial fixed-buffer echo service, grounded on
//! `examples/original_source/echo/{echoserver,echoclient}.c`. Exists to
//! exercise the worker pool and queue against a real socket, independent
//! of the GETFILE header grammar.

pub mod client;
pub mod server;

pub use client::echo_once;
pub use server::EchoServer;
