// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Fixed-size worker pool consuming tasks from a [`Queue`]. Shutdown is a
//! poison pill rather than a boolean flag: the design notes call out that a
//! language without untyped pointers should model the queue element as
//! `Task(payload) | Shutdown` so the sentinel is type-safe, which is
//! exactly [`WorkItem`] below.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use crate::queue::Queue;

enum WorkItem<T> {
    Task(T),
    PoisonPill,
}

/// A fixed-N-thread pool. `D` is the per-worker local data created once at
/// thread start (e.g. a scratch buffer or a cloned handle) and destroyed
/// once at shutdown.
pub struct WorkerPool<T> {
    queue: Arc<Queue<WorkItem<T>>>,
    workers: Vec<JoinHandle<()>>,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Starts `num_workers` threads. Each computes its own `worker_data`
    /// from `global_data` via `create_worker_data`, then loops: dequeue,
    /// exit on poison pill, otherwise run `work_fn(task, worker_data,
    /// &global_data)`.
    pub fn start<G, D, F, C>(
        num_workers: usize,
        work_fn: F,
        create_worker_data: C,
        global_data: G,
    ) -> Self
    where
        G: Clone + Send + Sync + 'static,
        D: Send + 'static,
        F: Fn(T, &mut D, &G) + Send + Sync + 'static,
        C: Fn(&G) -> D + Send + Sync + 'static,
    {
        let queue = Arc::new(Queue::new());
        let work_fn = Arc::new(work_fn);
        let create_worker_data = Arc::new(create_worker_data);
        let global_data = Arc::new(global_data);

        let mut workers = Vec::with_capacity(num_workers);
        for id in 0..num_workers {
            let queue = Arc::clone(&queue);
            let work_fn = Arc::clone(&work_fn);
            let create_worker_data = Arc::clone(&create_worker_data);
            let global_data = Arc::clone(&global_data);
            workers.push(
                thread::Builder::new()
                    .name(format!("worker-{id}"))
                    .spawn(move || {
                        let mut worker_data = create_worker_data(&global_data);
                        loop {
                            match queue.dequeue() {
                                WorkItem::PoisonPill => break,
                                WorkItem::Task(task) => {
                                    work_fn(task, &mut worker_data, &global_data);
                                }
                            }
                        }
                    })
                    .expect("failed to spawn worker thread"),
            );
        }

        WorkerPool { queue, workers }
    }

    /// Enqueues one task for some worker to pick up.
    pub fn submit(&self, task: T) {
        self.queue.enqueue(WorkItem::Task(task));
    }

    /// Enqueues exactly one poison pill per worker, then joins every
    /// thread. Blocks until every task enqueued before this call returns.
    pub fn finish(mut self) {
        let pills = (0..self.workers.len()).map(|_| WorkItem::PoisonPill);
        self.queue.enqueue_many(pills);
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}
