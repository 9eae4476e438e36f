// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error kinds for the transport and codec ports (spec §7: "NetworkError /
//! BrokerError").

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network connect failed: {0}")]
    Network(String),

    #[error("broker connect failed: {0}")]
    Broker(String),

    #[error("not connected")]
    NotConnected,

    #[error("subscribe failed for topic `{0}`: {1}")]
    Subscribe(String, String),

    #[error("publish failed for topic `{0}`: {1}")]
    Publish(String, String),

    #[error("retries exhausted after {0} attempts")]
    RetriesExhausted(u32),
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encode failed: {0}")]
    Encode(String),

    #[error("decode failed: {0}")]
    Decode(String),
}
