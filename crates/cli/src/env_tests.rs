// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serial_test::serial;

use super::*;

fn clear() {
    std::env::remove_var("WOT_STATE_DIR");
    std::env::remove_var("XDG_STATE_HOME");
}

#[test]
#[serial]
fn wot_state_dir_wins_when_set() {
    clear();
    std::env::set_var("WOT_STATE_DIR", "/tmp/wot-explicit");
    assert_eq!(state_dir().unwrap(), PathBuf::from("/tmp/wot-explicit"));
    clear();
}

#[test]
#[serial]
fn falls_back_to_xdg_state_home_when_unset() {
    clear();
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg");
    assert_eq!(state_dir().unwrap(), PathBuf::from("/tmp/xdg/wot"));
    clear();
}

#[test]
#[serial]
fn falls_back_to_home_local_state_when_nothing_else_is_set() {
    clear();
    let home = std::env::var("HOME").unwrap();
    assert_eq!(state_dir().unwrap(), PathBuf::from(home).join(".local/state/wot"));
}
