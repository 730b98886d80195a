// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! A bounded-in-spirit (no capacity cap is enforced; backpressure lives one
//! layer up, at the accept loop) FIFO queue shared by producers and the
//! worker pool's consumers.
//!
//! A single mutex plus a condvar, matching the design's concurrency model
//! exactly — not a channel, since the worker pool needs `enqueue_many` to
//! take the lock once and wake either one or every waiter.

use std::{
    collections::VecDeque,
    sync::{Condvar, Mutex},
};

struct Inner<T> {
    items: VecDeque<T>,
}

/// FIFO queue of opaque task handles. Cloning a [`Queue`] handle (via
/// `Arc`) is how producers and the worker pool share it; the queue itself
/// has no notion of who produced or who will consume an item.
pub struct Queue<T> {
    inner: Mutex<Inner<T>>,
    not_empty: Condvar,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Queue::new()
    }
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Queue {
            inner: Mutex::new(Inner {
                items: VecDeque::new(),
            }),
            not_empty: Condvar::new(),
        }
    }

    /// Enqueues a single item and wakes one waiting consumer.
    pub fn enqueue(&self, item: T) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.items.push_back(item);
        self.not_empty.notify_one();
    }

    /// Enqueues `items` atomically (lock taken once). Wakes one waiter if
    /// exactly one item was added, otherwise wakes every waiter.
    pub fn enqueue_many<I: IntoIterator<Item = T>>(&self, items: I) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let before = inner.items.len();
        inner.items.extend(items);
        let added = inner.items.len() - before;
        drop(inner);
        match added {
            0 => {}
            1 => self.not_empty.notify_one(),
            _ => self.not_empty.notify_all(),
        }
    }

    /// Blocks until an item is available, then returns the earliest one
    /// enqueued.
    pub fn dequeue(&self) -> T {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            if let Some(item) = inner.items.pop_front() {
                return item;
            }
            inner = self
                .not_empty
                .wait(inner)
                .unwrap_or_else(|e| e.into_inner());
        }
    }

    /// Non-blocking snapshot; racy by construction, for diagnostics only.
    pub fn empty(&self) -> bool {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.items.is_empty()
    }
}
