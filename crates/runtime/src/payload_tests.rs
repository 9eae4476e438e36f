// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use wot_core::AffordanceStore;

use super::*;

#[test]
fn load_payload_reports_a_missing_file() {
    let mut store: AffordanceStore<ActionHandler> = AffordanceStore::new();
    let err = load_payload("/nonexistent/path/app.so", &mut store).unwrap_err();
    assert!(matches!(err, PayloadError::Load(_)));
}

#[test]
#[cfg_attr(not(target_os = "linux"), ignore)]
fn load_payload_reports_a_missing_setup_symbol() {
    let mut store: AffordanceStore<ActionHandler> = AffordanceStore::new();
    let err = load_payload("libc.so.6", &mut store).unwrap_err();
    assert!(matches!(err, PayloadError::MissingSymbol(_)));
}
