// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn rejects_reserved_first_segment() {
    assert!(validate_affordance_name("vfs/custom", "mything").is_err());
    assert!(validate_affordance_name("events/foo", "mything").is_err());
}

#[test]
fn rejects_runtime_name_collision() {
    assert!(validate_affordance_name("mything/status", "mything").is_err());
}

#[test]
fn allows_model_namespace_names() {
    assert!(validate_affordance_name("led/color", "mything").is_ok());
}

#[test]
fn rejects_wildcard_tokens() {
    assert!(validate_affordance_name("led/#", "mything").is_err());
    assert!(validate_affordance_name("led/+/color", "mything").is_err());
}

#[test]
fn contains_wildcard_checks_every_segment() {
    assert!(contains_wildcard("a/b/#"));
    assert!(!contains_wildcard("a/b/c"));
}
