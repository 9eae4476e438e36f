// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reads config files from disk into already-parsed TOML tables; merging
//! and schema validation is `wot_core::Config::merge_and_validate`'s job.
//! Kept as a separate step so later files can layer over earlier ones
//! (a base config plus a secrets file, spec §1 "Configuration").

use std::path::Path;

use wot_core::ConfigError;

pub fn read_table(path: &Path) -> Result<toml::value::Table, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    text.parse::<toml::value::Table>().map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

pub fn read_tables(paths: &[std::path::PathBuf]) -> Result<Vec<toml::value::Table>, ConfigError> {
    paths.iter().map(|p| read_table(p)).collect()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
