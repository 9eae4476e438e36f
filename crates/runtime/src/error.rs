// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised by the connector lifecycle and the core action set (spec
//! §7: startup errors are fatal, steady-state errors are confined).

use thiserror::Error;
use wot_core::{ConfigError, CoreActionError};
use wot_transport::{CodecError, TransportError};

/// Errors that can abort a lifecycle transition (spec §4.4). Every
/// variant here is fatal to the transition it occurred in; the connector
/// decides per-transition whether that means retry-with-backoff or a
/// soft reset.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    CoreAction(#[from] CoreActionError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("user payload load failed: {0}")]
    Payload(String),

    #[error("failed to serialize {0} for publishing: {1}")]
    Serialize(&'static str, String),
}
