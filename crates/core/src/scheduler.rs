// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure scheduler data types and drift-compensation arithmetic (spec §4.2,
//! §5, C5). The executor that actually spawns and tracks tasks lives in
//! `wot-runtime::scheduler`, since running a task needs an async runtime;
//! this crate only owns the types and the math so they can be unit tested
//! without one.

use std::time::{Duration, Instant};

/// Identifies a task in the scheduler's registry. At most one live task per
/// id (spec §3, "Task record").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A task's period. `OneShot` runs the body once and then drops the
/// record; `Periodic` reschedules after drift compensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPeriod {
    OneShot,
    Periodic(Duration),
}

impl TaskPeriod {
    /// Mirrors the source convention of encoding one-shot as a zero period.
    pub fn from_millis(period_ms: u64) -> Self {
        if period_ms == 0 {
            TaskPeriod::OneShot
        } else {
            TaskPeriod::Periodic(Duration::from_millis(period_ms))
        }
    }

    pub fn is_one_shot(&self) -> bool {
        matches!(self, TaskPeriod::OneShot)
    }
}

/// Computes how long a periodic task should sleep before its next
/// invocation, given the wake time it targeted and a way to read the
/// current time.
///
/// Returns `None` when the body already overran `wake_at` — the caller
/// should yield once and let drift absorb into the next cycle, exactly as
/// spec §4.2 step 4 describes, rather than sleeping a negative duration.
pub fn next_sleep(period: Duration, wake_at: Instant, now: impl Fn() -> Instant) -> Option<Duration> {
    let current = now();
    if wake_at <= current {
        let overrun = current.saturating_duration_since(wake_at);
        if !period.is_zero() && overrun > period {
            tracing::warn!(
                overrun_ms = overrun.as_millis() as u64,
                period_ms = period.as_millis() as u64,
                "task body exceeded its period; drift absorbed into next cycle"
            );
        }
        None
    } else {
        Some(wake_at - current)
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
