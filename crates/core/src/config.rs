// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration schema and merge-then-validate (spec §6, C1; ambient
//! config layering supplemented from `ssaHAL/ssa/_config.py`'s
//! `ConfigLoader`). Reading files is the bootstrap's job (`wot-cli`); this
//! module only merges already-parsed tables and validates the result
//! against the schema.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::identity::Version;

fn default_port() -> u16 {
    1883
}

fn default_keepalive() -> u16 {
    60
}

fn default_clean_session() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TmConfig {
    pub name: String,
    pub version: Version,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkConfig {
    pub ssid: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BrokerConfig {
    pub client_id: String,
    pub ipv4: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_keepalive")]
    pub keepalive: u16,
    #[serde(default)]
    pub ssl: Option<toml::Value>,
    #[serde(default = "default_clean_session")]
    pub clean_session: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConnectionConfig {
    pub retries: u32,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RuntimeSection {
    pub broker: BrokerConfig,
    pub connection: ConnectionConfig,
}

/// The validated configuration bundle (spec §6, "Configuration schema").
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub tm: TmConfig,
    pub network: NetworkConfig,
    pub runtime: RuntimeSection,
}

impl Config {
    /// Merges a sequence of already-parsed TOML tables, later tables
    /// overriding earlier ones on top-level key collision (mirrors the
    /// original's `dict.update` merge-by-update semantics for layering a
    /// secrets file over a base config), then validates the merged result
    /// against the schema.
    pub fn merge_and_validate(tables: Vec<toml::value::Table>) -> Result<Config, ConfigError> {
        let mut merged = toml::value::Table::new();
        for table in tables {
            for (key, value) in table {
                merged.insert(key, value);
            }
        }
        toml::Value::Table(merged).try_into().map_err(ConfigError::Schema)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
