// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const BASE: &str = r#"
[tm]
name = "led-strip"
[tm.version]
model = "1.0.0"
instance = "1.0.0"

[network]
ssid = "lab-wifi"
password = "hunter2"

[runtime.broker]
client_id = "led-strip-01"
ipv4 = "10.0.0.5"

[runtime.connection]
retries = 5
timeout_ms = 500
"#;

#[test]
fn reads_and_parses_a_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, BASE).unwrap();

    let table = read_table(&path).unwrap();
    assert_eq!(table["tm"]["name"].as_str(), Some("led-strip"));
}

#[test]
fn reports_a_missing_file_as_a_read_error() {
    let err = read_table(std::path::Path::new("/nonexistent/wotd-config.toml")).unwrap_err();
    assert!(matches!(err, wot_core::ConfigError::Read(_, _)));
}

#[test]
fn reports_invalid_toml_as_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "not valid = [ toml").unwrap();

    let err = read_table(&path).unwrap_err();
    assert!(matches!(err, wot_core::ConfigError::Parse(_, _)));
}

#[test]
fn reads_multiple_files_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let base_path = dir.path().join("config.toml");
    let secrets_path = dir.path().join("secrets.toml");
    std::fs::write(&base_path, BASE).unwrap();
    std::fs::write(&secrets_path, r#"[network]
ssid = "lab-wifi"
password = "overridden""#).unwrap();

    let tables = read_tables(&[base_path, secrets_path]).unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[1]["network"]["password"].as_str(), Some("overridden"));
}
