// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task executor (spec §4.2, §5, C5). `wot-core::scheduler` owns the pure
//! drift-compensation arithmetic; this module owns the actual running of
//! tasks: one `tokio::spawn` per task, a `CancellationToken` observed at
//! every suspension point, and a registry the main loop and `task_cancel`
//! can probe synchronously.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use wot_core::scheduler::next_sleep;
use wot_core::{Clock, TaskId, TaskPeriod};

/// A task's cancellation token tagged with the generation it was created
/// at, so a stale task's terminal cleanup can tell whether the registry
/// entry still belongs to it (see `task_create`'s final `remove`).
struct Slot {
    generation: u64,
    token: CancellationToken,
}

/// Cooperative task registry (spec §3 "Task record", §4.2 "Scheduler").
///
/// A second `task_create` with an id already in the registry cancels and
/// replaces the running task (spec §9 open question, decided: overwrite —
/// the original source assigns `self._tasks[id] = task` unconditionally).
pub struct Scheduler<C> {
    clock: C,
    tasks: Arc<Mutex<HashMap<TaskId, Slot>>>,
    next_generation: Arc<AtomicU64>,
}

impl<C: Clock + 'static> Scheduler<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, tasks: Arc::new(Mutex::new(HashMap::new())), next_generation: Arc::new(AtomicU64::new(0)) }
    }

    pub fn task_count(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_running(&self, id: &TaskId) -> bool {
        self.tasks.lock().contains_key(id)
    }

    /// Registers and runs a task. `body` is invoked once per cycle;
    /// `Err` logs the failure with the task id and ends the task (spec
    /// §4.2 "Failure isolation") without affecting siblings or the main
    /// loop.
    pub fn task_create<F, Fut, E>(&self, id: TaskId, period: TaskPeriod, mut body: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        if let Some(existing) = self.tasks.lock().remove(&id) {
            existing.token.cancel();
        }

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        self.tasks.lock().insert(id.clone(), Slot { generation, token: token.clone() });

        let tasks = self.tasks.clone();
        let clock = self.clock.clone();
        let task_id = id.clone();

        tokio::spawn(async move {
            loop {
                let wake_at = match period {
                    TaskPeriod::Periodic(p) => Some(clock.now() + p),
                    TaskPeriod::OneShot => None,
                };

                let outcome = tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!(task_id = %task_id, "task cancelled");
                        break;
                    }
                    result = body() => result,
                };

                if let Err(e) = outcome {
                    tracing::warn!(task_id = %task_id, error = %e, "task body failed");
                    break;
                }

                match (period, wake_at) {
                    (TaskPeriod::OneShot, _) => break,
                    (TaskPeriod::Periodic(p), Some(wake_at)) => match next_sleep(p, wake_at, || clock.now()) {
                        Some(delay) => {
                            tokio::select! {
                                _ = token.cancelled() => break,
                                _ = tokio::time::sleep(delay) => {}
                            }
                        }
                        None => tokio::task::yield_now().await,
                    },
                    (TaskPeriod::Periodic(_), None) => unreachable!("periodic task always computes a wake_at"),
                }
            }
            // Only remove the entry if it's still this task's own slot —
            // an overwriting `task_create` call already replaced it with
            // a newer generation, and removing blindly here would evict
            // the replacement out from under it (it never reschedules,
            // so this task's loop only reaches here after exiting).
            let mut guard = tasks.lock();
            if guard.get(&task_id).is_some_and(|slot| slot.generation == generation) {
                guard.remove(&task_id);
            }
        });
    }

    /// Cooperative cancellation: removes the task's registry entry and
    /// signals its token. Idempotent; cancelling an unknown id is a no-op
    /// with a warning (spec §4.2 "task_cancel").
    pub fn task_cancel(&self, id: &TaskId) {
        match self.tasks.lock().remove(id) {
            Some(slot) => slot.token.cancel(),
            None => tracing::warn!(task_id = %id, "task_cancel: no such task"),
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
