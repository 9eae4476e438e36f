// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wot-transport: Serializer Port and Transport Port (spec C3, C4), plus
//! one concrete transport (MQTT, via `rumqttc`) and two concrete codecs
//! (JSON, MessagePack).

pub mod codec;
pub mod error;
pub mod message;
pub mod mqtt;
pub mod transport;

pub use codec::{decode_typed, encode_typed, Codec, JsonCodec, MsgpackCodec};
pub use error::{CodecError, TransportError};
pub use message::{Message, Qos};
pub use mqtt::{MqttConfig, MqttTransport};
pub use transport::Transport;

#[cfg(any(test, feature = "test-support"))]
pub use transport::fake::FakeTransport;
