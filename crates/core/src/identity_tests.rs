// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn sample() -> Identity {
    Identity::new(
        "led-strip",
        "a1b2c3",
        Version { model: "1.0.0".to_string(), instance: "1.0.0".to_string() },
    )
}

#[test]
fn base_topic_is_model_slash_uuid() {
    assert_eq!(sample().base_topic(), "led-strip/a1b2c3");
}

#[test]
fn event_topic_nests_under_model() {
    assert_eq!(sample().event_topic("color-changed"), "led-strip/a1b2c3/events/led-strip/color-changed");
}

#[test]
fn property_topic_nests_under_model() {
    assert_eq!(sample().property_topic("brightness"), "led-strip/a1b2c3/properties/led-strip/brightness");
}

#[test]
fn actions_filters_cover_both_namespaces() {
    let id = sample();
    assert_eq!(id.actions_model_filter(), "led-strip/a1b2c3/actions/led-strip/#");
    assert_eq!(id.actions_runtime_filter("ssa"), "led-strip/a1b2c3/actions/ssa/#");
}

#[test]
fn registration_topic_uses_reserved_ssa_prefix() {
    assert_eq!(sample().registration_topic("ssa"), "ssa/registration/ssa");
}

#[test]
fn vfs_report_topic_is_under_runtime_namespace() {
    assert_eq!(sample().vfs_report_topic("ssa"), "led-strip/a1b2c3/events/ssa/vfs/report");
}
