// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use serde_json::{Map, Value};

use crate::affordances::Publisher;
use crate::identity::{Identity, Version};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for the router and diff invariants (spec §8).
pub mod strategies {
    use proptest::prelude::*;
    use serde_json::{Map, Value};

    /// A single path segment: lowercase ASCII, never starting with `{`.
    pub fn arb_literal_segment() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9]{0,6}".prop_map(|s| s)
    }

    /// A URI template of 1-4 segments, each either literal or `{var}`.
    pub fn arb_template() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                arb_literal_segment(),
                arb_literal_segment().prop_map(|s| format!("{{{s}}}")),
            ],
            1..4,
        )
        .prop_map(|segments| segments.join("/"))
    }

    fn arb_leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(|n| Value::Number(n.into())),
            "[a-z]{0,8}".prop_map(Value::String),
        ]
    }

    /// A shallow JSON object suitable for diff-invariant testing.
    pub fn arb_object(keys: &[&'static str]) -> impl Strategy<Value = Value> {
        let keys: Vec<&'static str> = keys.to_vec();
        prop::collection::vec(arb_leaf(), keys.len()).prop_map(move |values| {
            let mut map = Map::new();
            for (key, value) in keys.iter().zip(values) {
                map.insert((*key).to_string(), value);
            }
            Value::Object(map)
        })
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────

pub fn sample_identity() -> Identity {
    Identity::new(
        "led-strip",
        "test-uuid",
        Version { model: "1.0.0".to_string(), instance: "1.0.0".to_string() },
    )
}

/// A [`Publisher`] that records every call instead of touching a transport.
#[derive(Default)]
pub struct RecordingPublisher {
    pub calls: Vec<(String, Value, bool, u8)>,
    pub fail_next: bool,
}

impl Publisher for RecordingPublisher {
    fn publish(&mut self, topic: &str, payload: &Value, retain: bool, qos: u8) -> Result<(), String> {
        if self.fail_next {
            return Err("publish failed".to_string());
        }
        self.calls.push((topic.to_string(), payload.clone(), retain, qos));
        Ok(())
    }
}

pub fn empty_object() -> Value {
    Value::Object(Map::new())
}
