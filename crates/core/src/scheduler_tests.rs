// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn next_sleep_returns_remaining_time_when_ahead_of_schedule() {
    let start = Instant::now();
    let wake_at = start + Duration::from_millis(100);
    let sleep = next_sleep(Duration::from_millis(100), wake_at, || start);
    assert_eq!(sleep, Some(Duration::from_millis(100)));
}

#[test]
fn next_sleep_returns_none_when_overrun() {
    let start = Instant::now();
    let wake_at = start;
    let later = start + Duration::from_millis(5);
    let sleep = next_sleep(Duration::from_millis(100), wake_at, || later);
    assert_eq!(sleep, None);
}

#[test]
fn next_sleep_returns_none_exactly_at_wake_time() {
    let start = Instant::now();
    let sleep = next_sleep(Duration::from_millis(50), start, || start);
    assert_eq!(sleep, None);
}

#[test]
fn task_period_zero_millis_is_one_shot() {
    assert_eq!(TaskPeriod::from_millis(0), TaskPeriod::OneShot);
    assert!(TaskPeriod::from_millis(0).is_one_shot());
}

#[test]
fn task_period_nonzero_millis_is_periodic() {
    assert_eq!(TaskPeriod::from_millis(250), TaskPeriod::Periodic(Duration::from_millis(250)));
    assert!(!TaskPeriod::from_millis(250).is_one_shot());
}

#[test]
fn task_id_displays_as_its_string() {
    let id = TaskId::new("blink");
    assert_eq!(id.to_string(), "blink");
    assert_eq!(id.as_str(), "blink");
}
