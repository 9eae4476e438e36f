// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[derive(Default)]
struct RecordingPublisher {
    calls: Vec<(String, Value, bool, u8)>,
    fail_next: bool,
}

impl Publisher for RecordingPublisher {
    fn publish(&mut self, topic: &str, payload: &Value, retain: bool, qos: u8) -> Result<(), String> {
        if self.fail_next {
            return Err("broker unreachable".to_string());
        }
        self.calls.push((topic.to_string(), payload.clone(), retain, qos));
        Ok(())
    }
}

#[test]
fn create_rejects_duplicate_names() {
    let mut store: AffordanceStore<()> = AffordanceStore::new();
    store.create("brightness", json!(50), true).unwrap();
    let err = store.create("brightness", json!(60), true).unwrap_err();
    assert_eq!(err, PropertyError::DuplicateProperty("brightness".to_string()));
}

#[test]
fn get_returns_a_copy_not_an_alias() {
    let mut store: AffordanceStore<()> = AffordanceStore::new();
    store.create("s", json!({"a": 1}), true).unwrap();
    let mut copy = store.get("s").unwrap();
    copy["a"] = json!(999);
    assert_eq!(store.get("s").unwrap(), json!({"a": 1}));
}

#[test]
fn get_unknown_property_errors() {
    let store: AffordanceStore<()> = AffordanceStore::new();
    assert_eq!(store.get("nope").unwrap_err(), PropertyError::UnknownProperty("nope".to_string()));
}

#[test]
fn set_rejects_type_mismatch() {
    let mut store: AffordanceStore<()> = AffordanceStore::new();
    store.create("brightness", json!(50), true).unwrap();
    let mut publisher = RecordingPublisher::default();
    let target = PublishTarget { topic: "t/brightness", retain: true, qos: 1 };
    let err = store.set("brightness", json!("bright"), true, target, &mut publisher).unwrap_err();
    assert!(matches!(err, PropertyError::TypeMismatch { .. }));
}

#[test]
fn set_publishes_diff_for_dict_properties() {
    let mut store: AffordanceStore<()> = AffordanceStore::new();
    store.create("s", json!({"a": 1, "b": 2}), true).unwrap();
    let mut publisher = RecordingPublisher::default();
    let target = PublishTarget { topic: "t/s", retain: true, qos: 1 };
    store.set("s", json!({"a": 1, "b": 3}), true, target, &mut publisher).unwrap();

    assert_eq!(publisher.calls.len(), 1);
    assert_eq!(publisher.calls[0].1, json!({"b": 3}));
    assert_eq!(store.get("s").unwrap(), json!({"a": 1, "b": 3}));
}

#[test]
fn set_of_equal_value_is_a_no_op() {
    let mut store: AffordanceStore<()> = AffordanceStore::new();
    store.create("brightness", json!(50), true).unwrap();
    let mut publisher = RecordingPublisher::default();
    let target = PublishTarget { topic: "t/brightness", retain: true, qos: 1 };
    store.set("brightness", json!(50), true, target, &mut publisher).unwrap();
    assert!(publisher.calls.is_empty());
}

#[test]
fn always_sync_property_republishes_equal_values() {
    let mut store: AffordanceStore<()> = AffordanceStore::new();
    store.create_with_sync("heartbeat", json!(1), true, true).unwrap();
    let mut publisher = RecordingPublisher::default();
    let target = PublishTarget { topic: "t/heartbeat", retain: false, qos: 0 };
    store.set("heartbeat", json!(1), true, target, &mut publisher).unwrap();
    assert_eq!(publisher.calls.len(), 1);
}

#[test]
fn set_failure_leaves_stored_state_unchanged() {
    let mut store: AffordanceStore<()> = AffordanceStore::new();
    store.create("brightness", json!(50), true).unwrap();
    let mut publisher = RecordingPublisher { fail_next: true, ..Default::default() };
    let target = PublishTarget { topic: "t/brightness", retain: true, qos: 1 };
    let err = store.set("brightness", json!(75), true, target, &mut publisher).unwrap_err();
    assert!(matches!(err, PropertyError::PublishFailure(_, _)));
    assert_eq!(store.get("brightness").unwrap(), json!(50));
}

#[test]
fn emit_rejects_reserved_segment_names() {
    let store: AffordanceStore<()> = AffordanceStore::new();
    let mut publisher = RecordingPublisher::default();
    let target = PublishTarget { topic: "t/vfs/custom", retain: false, qos: 0 };
    let err = store.emit("vfs/custom", &json!({}), "mything", target, &mut publisher).unwrap_err();
    assert!(matches!(err, PropertyError::PublishFailure(_, _)));
    assert!(publisher.calls.is_empty());
}

#[test]
fn emit_publishes_valid_event_names() {
    let store: AffordanceStore<()> = AffordanceStore::new();
    let mut publisher = RecordingPublisher::default();
    let target = PublishTarget { topic: "t/motion", retain: false, qos: 0 };
    store.emit("motion-detected", &json!({"zone": 1}), "mything", target, &mut publisher).unwrap();
    assert_eq!(publisher.calls.len(), 1);
}

#[test]
fn register_action_delegates_to_the_router() {
    let mut store: AffordanceStore<&'static str> = AffordanceStore::new();
    store.register_action("toggle", "handler").unwrap();
    let (handler, params) = store.resolve_action("toggle").unwrap();
    assert_eq!(*handler, "handler");
    assert!(params.is_empty());
}
