// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error kinds raised by the action router, affordance store, and config loader.

use thiserror::Error;

/// Errors raised by [`crate::Router::register`] and [`crate::Router::resolve`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("action template `{0}` cannot start with a URI parameter")]
    InvalidTemplate(String),

    #[error("handler for action template `{0}` already registered")]
    DuplicateHandler(String),
}

/// Errors raised by [`crate::AffordanceStore`] property operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertyError {
    #[error("property `{0}` already exists")]
    DuplicateProperty(String),

    #[error("property `{0}` does not exist")]
    UnknownProperty(String),

    #[error("property `{name}` type mismatch: expected {expected}, got {got}")]
    TypeMismatch { name: String, expected: &'static str, got: &'static str },

    #[error("property `{0}` cannot be updated via the default setter")]
    NotDefaultSettable(String),

    #[error("publish failed for property `{0}`: {1}")]
    PublishFailure(String, String),
}

/// Errors raised validating an event or action name against reserved segments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AffordanceNameError {
    #[error("name `{0}` uses a reserved path segment")]
    ReservedSegment(String),

    #[error("name `{0}` contains an MQTT wildcard token")]
    Wildcard(String),
}

/// Errors raised loading and validating [`crate::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Read(std::path::PathBuf, #[source] std::io::Error),

    #[error("failed to parse config file {0}: {1}")]
    Parse(std::path::PathBuf, #[source] toml::de::Error),

    #[error("config does not satisfy the required schema: {0}")]
    Schema(#[source] toml::de::Error),
}

/// Errors raised by the built-in core action set (C7).
#[derive(Debug, Error)]
pub enum CoreActionError {
    #[error("CRC-32 mismatch: expected {expected:08x}, got {got:08x}")]
    IntegrityFailure { expected: u32, got: u32 },

    #[error("unsupported integrity algorithm `{0}`")]
    Unsupported(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("property error: {0}")]
    Property(#[from] PropertyError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
