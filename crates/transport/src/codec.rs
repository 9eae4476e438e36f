// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serializer Port (spec §4's C3, §9 "Serializer as abstract port"): the
//! runtime depends on this capability, never on a concrete encoding.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::CodecError;

pub trait Codec: Send + Sync {
    fn encode(&self, value: &serde_json::Value) -> Result<Vec<u8>, CodecError>;
    fn decode(&self, bytes: &[u8]) -> Result<serde_json::Value, CodecError>;
}

/// Encodes a typed value through a `dyn Codec` by routing it through
/// `serde_json::Value` first; kept as a free function (rather than a
/// trait method) so `Codec` itself stays object-safe.
pub fn encode_typed<T: Serialize>(codec: &dyn Codec, value: &T) -> Result<Vec<u8>, CodecError> {
    let value = serde_json::to_value(value).map_err(|e| CodecError::Encode(e.to_string()))?;
    codec.encode(&value)
}

pub fn decode_typed<T: DeserializeOwned>(codec: &dyn Codec, bytes: &[u8]) -> Result<T, CodecError> {
    let value = codec.decode(bytes)?;
    serde_json::from_value(value).map_err(|e| CodecError::Decode(e.to_string()))
}

/// JSON over the wire, byte-for-byte `serde_json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(&self, value: &serde_json::Value) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<serde_json::Value, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

/// MessagePack over the wire, the symmetric binary serializer the spec's
/// payload-encoding section requires for round-trip fidelity.
#[derive(Debug, Default, Clone, Copy)]
pub struct MsgpackCodec;

impl Codec for MsgpackCodec {
    fn encode(&self, value: &serde_json::Value) -> Result<Vec<u8>, CodecError> {
        rmp_serde::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<serde_json::Value, CodecError> {
        rmp_serde::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
