// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The precomputed GETFILE keyword table: compiled once, lazily, and shared
//! by every [`crate::tokenizer::Tokenizer`] instance.

use std::sync::LazyLock;

use crate::dfa::{TransitionTable, builder::{DfaSpec, compile}};

/// One recognized header keyword. Carried as the DFA's word payload; the
/// tokenizer turns a recognized [`Keyword`] into the matching
/// [`crate::tokenizer::Token`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Getfile,
    Get,
    Ok,
    FileNotFound,
    Error,
    Invalid,
}

/// Generic-word-start alphabet: only a path's leading `/` starts a
/// free-form word.
pub const STARTS_GENERIC: &[u8] = b"/";

/// Header terminator, shared by requests and responses.
pub const TERMINATOR: &[u8] = b"\r\n\r\n";

fn spec() -> DfaSpec<Keyword> {
    DfaSpec {
        words: vec![
            ("GETFILE".to_owned(), Keyword::Getfile),
            ("GET".to_owned(), Keyword::Get),
            ("OK".to_owned(), Keyword::Ok),
            ("FILE_NOT_FOUND".to_owned(), Keyword::FileNotFound),
            ("ERROR".to_owned(), Keyword::Error),
            ("INVALID".to_owned(), Keyword::Invalid),
        ],
        starts_generic: STARTS_GENERIC.to_vec(),
        terminator: TERMINATOR.to_vec(),
    }
}

/// The table every `gfserver`/`gfclient`/`gfclient_download` tokenizer is
/// built from. State count is `NUM_BASE_STATES + 35 + 3` (35 keyword stems:
/// `GETFILE` and `GET` share their first three stems; 3 terminator stems for
/// the four-byte `\r\n\r\n`).
pub static GETFILE_TABLE: LazyLock<TransitionTable<Keyword>> =
    LazyLock::new(|| compile(&spec()).expect("built-in GETFILE keyword table must validate"));
