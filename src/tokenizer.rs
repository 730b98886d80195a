// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Table-driven header tokenizer. Consumes bytes incrementally against a
//! [`TransitionTable`] and yields a log of [`Token`]s.
//!
//! Grounded on `examples/original_source/generator`'s runtime counterpart
//! (the tokenizer that walks the compiled table) plus the algorithm in the
//! design notes: one table lookup per byte, an append-only recording
//! buffer, and a decimal accumulator updated unconditionally (cheap; only
//! digit states ever read it back).

use crate::dfa::{
    Action, BaseState, Emission, StateId, TransitionTable,
    keywords::{GETFILE_TABLE, Keyword},
};

/// A single recognized token. `Path` holds an owned copy of the bytes
/// recorded for that word rather than a borrow into the tokenizer's
/// recording buffer — the allocation is cheap relative to a network round
/// trip, and it keeps `Token` free of a lifetime parameter (the
/// alternative sanctioned by the design notes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Getfile,
    Get,
    Ok,
    FileNotFound,
    Error,
    Invalid,
    Size(u64),
    Path(String),
}

impl From<Keyword> for Token {
    fn from(k: Keyword) -> Self {
        match k {
            Keyword::Getfile => Token::Getfile,
            Keyword::Get => Token::Get,
            Keyword::Ok => Token::Ok,
            Keyword::FileNotFound => Token::FileNotFound,
            Keyword::Error => Token::Error,
            Keyword::Invalid => Token::Invalid,
        }
    }
}

/// Outcome of feeding a chunk of bytes to [`Tokenizer::process`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consumed {
    /// Number of bytes consumed from the input before the tokenizer
    /// stopped, in `[0, len]`.
    pub n: usize,
    /// Whether the terminator was seen inside this call.
    pub done: bool,
    /// Whether an invalid byte was seen inside this call.
    pub invalid: bool,
}

/// Consumes header bytes one at a time against a shared [`TransitionTable`],
/// building up a log of [`Token`]s.
pub struct Tokenizer<'t> {
    table: &'t TransitionTable<Keyword>,
    state: StateId,
    tokens: Vec<Token>,
    recording: Vec<u8>,
    recording_start: usize,
    number_acc: u64,
    done: bool,
    invalid: bool,
}

impl Default for Tokenizer<'static> {
    fn default() -> Self {
        Tokenizer::new()
    }
}

impl Tokenizer<'static> {
    /// A tokenizer bound to the built-in GETFILE keyword table.
    pub fn new() -> Self {
        Tokenizer::with_table(&GETFILE_TABLE)
    }
}

impl<'t> Tokenizer<'t> {
    /// A tokenizer bound to an arbitrary table, for tests exercising
    /// non-GETFILE keyword sets.
    pub fn with_table(table: &'t TransitionTable<Keyword>) -> Self {
        Tokenizer {
            table,
            state: BaseState::Start.id(),
            tokens: Vec::new(),
            recording: Vec::new(),
            recording_start: 0,
            number_acc: 0,
            done: false,
            invalid: false,
        }
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn invalid(&self) -> bool {
        self.invalid
    }

    pub fn num_tokens(&self) -> usize {
        self.tokens.len()
    }

    pub fn token(&self, i: usize) -> Option<&Token> {
        self.tokens.get(i)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Resets to the freshly-created state, discarding all tokens and
    /// recorded bytes.
    pub fn reset(&mut self) {
        self.state = BaseState::Start.id();
        self.tokens.clear();
        self.recording.clear();
        self.recording_start = 0;
        self.number_acc = 0;
        self.done = false;
        self.invalid = false;
    }

    /// Feeds `bytes` in order. Stops as soon as the tokenizer becomes
    /// `done` or `invalid`; returns `None` if it was already terminal
    /// before this call (mirrors `process -> -1` on an already-invalid
    /// tokenizer).
    pub fn process(&mut self, bytes: &[u8]) -> Option<Consumed> {
        if self.done || self.invalid {
            return None;
        }

        let mut consumed = 0usize;
        for &byte in bytes {
            consumed += 1;
            let action = self.table.action(self.state, byte).clone();
            self.apply(&action, byte);
            if self.state == BaseState::Done.id() {
                self.done = true;
                break;
            }
            if self.state == BaseState::Invalid.id() {
                self.invalid = true;
                break;
            }
        }

        Some(Consumed {
            n: consumed,
            done: self.done,
            invalid: self.invalid,
        })
    }

    fn apply(&mut self, action: &Action<Keyword>, byte: u8) {
        if let Some(emission) = &action.emitted {
            self.emit(emission.clone());
        }
        if action.reset_recording {
            self.recording.truncate(self.recording_start);
            self.number_acc = 0;
        }
        self.recording.push(byte);
        if byte.is_ascii_digit() {
            self.number_acc =
                self.number_acc.wrapping_mul(10) + u64::from(byte - b'0');
        }
        self.state = action.to_state;
    }

    fn emit(&mut self, emission: Emission<Keyword>) {
        match emission {
            Emission::Number => {
                self.tokens.push(Token::Size(self.number_acc));
            }
            Emission::Word(kw) => {
                self.tokens.push(Token::from(kw));
            }
            Emission::GenericWord => {
                let word = &self.recording[self.recording_start..];
                let path = String::from_utf8_lossy(word).into_owned();
                self.tokens.push(Token::Path(path));
                self.recording.push(0);
                self.recording_start = self.recording.len();
            }
        }
    }
}
