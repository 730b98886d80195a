// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Offline construction of a [`TransitionTable`] from a keyword list, a
//! generic-word-start alphabet, and a terminator string.
//!
//! Grounded on `examples/original_source/generator/{Graph,build_graph,compress_graph,write_table}.cpp`:
//! that generator built an uncompressed adjacency graph, then column-hashed
//! it into a class map. This module does the same in one pass over a
//! `HashMap<(StateId, u8), Action<W>>` instead of an explicit graph object,
//! since nothing downstream of construction needs to walk the graph as a
//! graph.

use std::{
    collections::HashMap,
    hash::Hash,
};

use crate::dfa::{
    Action, BaseState, DfaBuildError, Emission, NUM_BASE_STATES, StateId,
    TransitionTable, is_digit_byte, is_word_byte,
};

/// One entry in the keyword table: the literal header keyword and the
/// caller-chosen payload emitted when the tokenizer recognizes it.
#[derive(Debug, Clone)]
pub struct DfaSpec<W> {
    pub words: Vec<(String, W)>,
    pub starts_generic: Vec<u8>,
    pub terminator: Vec<u8>,
}

struct Builder<W> {
    transitions: HashMap<(StateId, u8), Action<W>>,
    next_state: StateId,
}

impl<W: Clone> Builder<W> {
    fn new_state(&mut self) -> StateId {
        let id = self.next_state;
        self.next_state += 1;
        id
    }

    fn set(&mut self, from: StateId, byte: u8, action: Action<W>) {
        self.transitions.insert((from, byte), action);
    }
}

fn validate<W>(spec: &DfaSpec<W>) -> Result<(), DfaBuildError> {
    for (word, _) in &spec.words {
        if word.is_empty() {
            return Err(DfaBuildError::EmptyWord(word.clone()));
        }
        if !word.bytes().all(is_word_byte) {
            return Err(DfaBuildError::WordHasNonWordByte(word.clone()));
        }
        // Safe to index: we just proved the string is non-empty.
        if is_digit_byte(word.as_bytes()[0]) {
            return Err(DfaBuildError::WordStartsWithDigit(word.clone()));
        }
    }
    for &c in &spec.starts_generic {
        if !is_word_byte(c) {
            return Err(DfaBuildError::GenericStartNotWordChar(c));
        }
        if is_digit_byte(c) {
            return Err(DfaBuildError::GenericStartIsDigit(c));
        }
        for (word, _) in &spec.words {
            if word.as_bytes().first() == Some(&c) {
                return Err(DfaBuildError::GenericStartCollidesWithWord(
                    c,
                    word.clone(),
                ));
            }
        }
    }
    if spec.terminator.is_empty() {
        return Err(DfaBuildError::EmptyTerminator);
    }
    if spec
        .terminator
        .iter()
        .any(|&b| is_word_byte(b) || b == b' ')
    {
        return Err(DfaBuildError::TerminatorHasWordByteOrSpace);
    }
    Ok(())
}

/// Compiles a [`DfaSpec`] into a compressed [`TransitionTable`].
///
/// `W` is the caller's per-keyword payload (the GETFILE keyword table uses
/// a small `Keyword` enum; tests use whatever fits). Construction follows
/// the seven ordered steps from the design: space, digit, generic-word
/// start, generic-word continuation, keyword stems, terminator stems, NUL
/// shortcut — each step inserted after the previous, so a later step's
/// transition for the same `(state, byte)` pair wins.
pub fn compile<W: Clone + Eq + Hash>(
    spec: &DfaSpec<W>,
) -> Result<TransitionTable<W>, DfaBuildError> {
    validate(spec)?;

    let mut b: Builder<W> = Builder {
        transitions: HashMap::new(),
        next_state: NUM_BASE_STATES as StateId,
    };

    let start = BaseState::Start.id();
    let invalid = BaseState::Invalid.id();
    let done = BaseState::Done.id();
    let in_space = BaseState::InSpace.id();
    let in_digits = BaseState::InDigits.id();
    let in_generic = BaseState::InGenericWord.id();
    let _ = invalid;

    // Step 1: space transitions.
    for from in [start, in_space] {
        b.set(from, b' ', Action {
            to_state: in_space,
            reset_recording: true,
            emitted: None,
        });
    }
    b.set(in_digits, b' ', Action {
        to_state: in_space,
        reset_recording: false,
        emitted: Some(Emission::Number),
    });
    b.set(in_generic, b' ', Action {
        to_state: in_space,
        reset_recording: false,
        emitted: Some(Emission::GenericWord),
    });

    // Step 2: digit transitions.
    for from in [start, in_space] {
        for d in b'0'..=b'9' {
            b.set(from, d, Action {
                to_state: in_digits,
                reset_recording: true,
                emitted: None,
            });
        }
    }
    for d in b'0'..=b'9' {
        b.set(in_digits, d, Action {
            to_state: in_digits,
            reset_recording: false,
            emitted: None,
        });
    }

    // Step 3: generic-word start.
    for &c in &spec.starts_generic {
        for from in [start, in_space] {
            b.set(from, c, Action {
                to_state: in_generic,
                reset_recording: true,
                emitted: None,
            });
        }
    }

    // Step 4: generic-word continuation.
    for c in 0u8..128 {
        if is_word_byte(c) {
            b.set(in_generic, c, Action {
                to_state: in_generic,
                reset_recording: false,
                emitted: None,
            });
        }
    }

    // Step 5: keyword stems, trie-shared across words with common prefixes.
    let mut word_stem: HashMap<&[u8], StateId> = HashMap::new();
    for (word, _) in &spec.words {
        let bytes = word.as_bytes();
        for i in 1..=bytes.len() {
            word_stem
                .entry(&bytes[..i])
                .or_insert_with(|| b.new_state());
        }
    }
    for (word, info) in &spec.words {
        let bytes = word.as_bytes();
        let first_state = word_stem[&bytes[..1]];
        for from in [start, in_space] {
            b.set(from, bytes[0], Action {
                to_state: first_state,
                reset_recording: true,
                emitted: None,
            });
        }
        for i in 1..bytes.len() {
            let prev = word_stem[&bytes[..i]];
            let next = word_stem[&bytes[..=i]];
            b.set(prev, bytes[i], Action {
                to_state: next,
                reset_recording: false,
                emitted: None,
            });
        }
        let final_state = word_stem[&bytes[..]];
        b.set(final_state, b' ', Action {
            to_state: in_space,
            reset_recording: false,
            emitted: Some(Emission::Word(info.clone())),
        });
    }

    // Step 6: terminator stems. `term_path[i]` is the state reached after
    // consuming `terminator[0..=i]`; the last entry is always `Done`.
    let terminator = &spec.terminator;
    let mut term_path: Vec<StateId> = Vec::with_capacity(terminator.len());
    for _ in 0..terminator.len().saturating_sub(1) {
        term_path.push(b.new_state());
    }
    term_path.push(done);

    b.set(in_space, terminator[0], Action {
        to_state: term_path[0],
        reset_recording: false,
        emitted: None,
    });
    b.set(in_digits, terminator[0], Action {
        to_state: term_path[0],
        reset_recording: false,
        emitted: Some(Emission::Number),
    });
    b.set(in_generic, terminator[0], Action {
        to_state: term_path[0],
        reset_recording: false,
        emitted: Some(Emission::GenericWord),
    });
    for (word, info) in &spec.words {
        let final_state = word_stem[&word.as_bytes()[..]];
        b.set(final_state, terminator[0], Action {
            to_state: term_path[0],
            reset_recording: false,
            emitted: Some(Emission::Word(info.clone())),
        });
    }
    for i in 1..terminator.len() {
        b.set(term_path[i - 1], terminator[i], Action {
            to_state: term_path[i],
            reset_recording: false,
            emitted: None,
        });
    }

    // Step 7: NUL from any state with a pending emission short-circuits
    // straight to `Done`, same as consuming the full terminator.
    b.set(in_digits, 0u8, Action {
        to_state: done,
        reset_recording: false,
        emitted: Some(Emission::Number),
    });
    b.set(in_generic, 0u8, Action {
        to_state: done,
        reset_recording: false,
        emitted: Some(Emission::GenericWord),
    });
    for (word, info) in &spec.words {
        let final_state = word_stem[&word.as_bytes()[..]];
        b.set(final_state, 0u8, Action {
            to_state: done,
            reset_recording: false,
            emitted: Some(Emission::Word(info.clone())),
        });
    }

    let num_states = b.next_state as usize;
    Ok(compress(b.transitions, num_states))
}

/// Column-hashes the uncompressed `(state, byte) -> Action` map into a
/// character-class map plus a `[state][class]` row, per the design's
/// compression rule: distinct digests get classes starting at 1, bytes with
/// no recorded transition anywhere collapse into class 0.
fn compress<W: Clone + Eq + Hash>(
    transitions: HashMap<(StateId, u8), Action<W>>,
    num_states: usize,
) -> TransitionTable<W> {
    let column = |byte: u8| -> Vec<Action<W>> {
        (0..num_states as StateId)
            .map(|s| {
                transitions
                    .get(&(s, byte))
                    .cloned()
                    .unwrap_or_else(Action::invalid)
            })
            .collect()
    };

    let default_column: Vec<Action<W>> =
        (0..num_states).map(|_| Action::invalid()).collect();

    let mut digest_to_class: HashMap<Vec<Action<W>>, u8> = HashMap::new();
    digest_to_class.insert(default_column, 0);
    let mut class_reps: Vec<u8> = vec![0]; // class_reps[0] is unused (class 0 is the default).
    let mut class_of = [0u8; 128];
    let mut next_class: u8 = 1;

    for byte in 0u8..128 {
        let col = column(byte);
        let class = *digest_to_class.entry(col).or_insert_with(|| {
            let c = next_class;
            next_class += 1;
            class_reps.push(byte);
            c
        });
        class_of[byte as usize] = class;
    }

    let num_classes = next_class as usize;
    let mut row: Vec<Vec<Action<W>>> = Vec::with_capacity(num_states);
    for s in 0..num_states as StateId {
        let mut state_row = Vec::with_capacity(num_classes);
        state_row.push(Action::invalid());
        for &rep in &class_reps[1..] {
            state_row.push(
                transitions
                    .get(&(s, rep))
                    .cloned()
                    .unwrap_or_else(Action::invalid),
            );
        }
        row.push(state_row);
    }

    TransitionTable {
        class_of,
        row,
        num_states,
        num_classes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dfa::NUM_BASE_STATES;

    fn getfile_spec() -> DfaSpec<&'static str> {
        DfaSpec {
            words: vec![
                ("GETFILE", "GETFILE"),
                ("GET", "GET"),
                ("OK", "OK"),
                ("FILE_NOT_FOUND", "FILE_NOT_FOUND"),
                ("ERROR", "ERROR"),
                ("INVALID", "INVALID"),
            ]
            .into_iter()
            .map(|(w, i)| (w.to_owned(), i))
            .collect(),
            starts_generic: vec![b'/'],
            terminator: b"\r\n\r\n".to_vec(),
        }
    }

    #[test]
    fn no_words_has_base_plus_terminator_states() {
        let spec: DfaSpec<&str> = DfaSpec {
            words: vec![],
            starts_generic: vec![],
            terminator: b"\r\n\r\n".to_vec(),
        };
        let table = compile(&spec).expect("test");
        assert_eq!(table.num_states, NUM_BASE_STATES + 3);
    }

    #[test]
    fn single_generic_start_has_base_plus_terminator_states() {
        let spec: DfaSpec<&str> = DfaSpec {
            words: vec![],
            starts_generic: vec![b'/'],
            terminator: b"\r\n\r\n".to_vec(),
        };
        let table = compile(&spec).expect("test");
        assert_eq!(table.num_states, NUM_BASE_STATES + 3);
    }

    #[test]
    fn getfile_keywords_have_35_stem_states() {
        let table = compile(&getfile_spec()).expect("test");
        assert_eq!(table.num_states, NUM_BASE_STATES + 35 + 3);
    }

    #[test]
    fn rejects_word_starting_with_digit() {
        let spec: DfaSpec<&str> = DfaSpec {
            words: vec![("1X".to_owned(), "x")],
            starts_generic: vec![],
            terminator: b"\r\n\r\n".to_vec(),
        };
        assert!(matches!(
            compile(&spec),
            Err(DfaBuildError::WordStartsWithDigit(_))
        ));
    }

    #[test]
    fn rejects_generic_start_colliding_with_word() {
        let spec: DfaSpec<&str> = DfaSpec {
            words: vec![("GET".to_owned(), "get")],
            starts_generic: vec![b'G'],
            terminator: b"\r\n\r\n".to_vec(),
        };
        assert!(matches!(
            compile(&spec),
            Err(DfaBuildError::GenericStartCollidesWithWord(..))
        ));
    }

    #[test]
    fn rejects_terminator_with_word_byte() {
        let spec: DfaSpec<&str> = DfaSpec {
            words: vec![],
            starts_generic: vec![],
            terminator: b"X".to_vec(),
        };
        assert!(matches!(
            compile(&spec),
            Err(DfaBuildError::TerminatorHasWordByteOrSpace)
        ));
    }

    #[test]
    fn class_zero_is_reserved_for_unused_bytes() {
        let table = compile(&getfile_spec()).expect("test");
        // A byte no transition ever mentions (e.g. 0x01) must fall into
        // class 0 and be Invalid from every state.
        assert_eq!(table.class_of_byte(0x01), 0);
        for s in 0..table.num_states as StateId {
            assert_eq!(table.action(s, 0x01).to_state, BaseState::Invalid.id());
        }
    }

    #[test]
    fn getfile_word_is_recognized_end_to_end() {
        let table = compile(&getfile_spec()).expect("test");
        let mut state = BaseState::Start.id();
        for &byte in b"GETFILE " {
            state = table.action(state, byte).to_state;
        }
        assert_eq!(state, BaseState::InSpace.id());
    }
}
