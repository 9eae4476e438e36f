// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bridges `wot_core::Publisher` (synchronous, so the core crate stays
//! free of an async runtime dependency) onto the async `Transport` +
//! `Codec` ports. Resolved in a single poll: under the single-threaded
//! cooperative model (spec §5) nothing else runs concurrently to drive a
//! pending future to completion, so a publish that can't complete on its
//! first poll — transport backpressure — is surfaced as a publish
//! failure rather than blocking the thread.

use std::future::Future;
use std::task::{Context, Poll, Waker};

use serde_json::Value;

use wot_core::Publisher;
use wot_transport::{Codec, Qos, Transport};

fn poll_once<F: Future>(fut: F) -> Option<F::Output> {
    let waker = Waker::noop();
    let mut cx = Context::from_waker(waker);
    let mut fut = std::pin::pin!(fut);
    match fut.as_mut().poll(&mut cx) {
        Poll::Ready(v) => Some(v),
        Poll::Pending => None,
    }
}

fn qos_from_u8(qos: u8) -> Qos {
    match qos {
        1 => Qos::AtLeastOnce,
        2 => Qos::ExactlyOnce,
        _ => Qos::AtMostOnce,
    }
}

/// A [`Publisher`] that encodes through `codec` and sends through
/// `transport`. Borrowed rather than owned so it can be constructed fresh
/// around each affordance-store call without the store itself needing to
/// know about either port.
pub struct TransportPublisher<'a> {
    transport: &'a mut dyn Transport,
    codec: &'a dyn Codec,
}

impl<'a> TransportPublisher<'a> {
    pub fn new(transport: &'a mut dyn Transport, codec: &'a dyn Codec) -> Self {
        Self { transport, codec }
    }
}

impl Publisher for TransportPublisher<'_> {
    fn publish(&mut self, topic: &str, payload: &Value, retain: bool, qos: u8) -> Result<(), String> {
        let bytes = self.codec.encode(payload).map_err(|e| e.to_string())?;
        let qos = qos_from_u8(qos);
        match poll_once(self.transport.publish(topic, bytes, retain, qos)) {
            Some(Ok(())) => Ok(()),
            Some(Err(e)) => Err(e.to_string()),
            None => Err(format!("publish to `{topic}` did not complete synchronously (backpressure)")),
        }
    }
}

#[cfg(test)]
#[path = "publisher_tests.rs"]
mod tests;
