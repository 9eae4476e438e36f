// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transport Port (spec §4's C4, §9 "Transport as abstract port").

use async_trait::async_trait;

use crate::error::TransportError;
use crate::message::{Message, Qos};

#[async_trait]
pub trait Transport: Send {
    /// Attaches to the network layer (Wi-Fi association, DHCP, ...). The
    /// connector drives retries; a single call here is one attempt.
    async fn connect(&mut self) -> Result<(), TransportError>;

    async fn disconnect(&mut self) -> Result<(), TransportError>;

    async fn subscribe(&mut self, topic: &str, qos: Qos) -> Result<(), TransportError>;

    async fn publish(
        &mut self,
        topic: &str,
        payload: Vec<u8>,
        retain: bool,
        qos: Qos,
    ) -> Result<(), TransportError>;

    /// Configures the last-will message; must be called before `connect`
    /// takes effect (spec §6: "last will", supplemented from
    /// `ssaHAL/ssa_modules/mqtt.py`'s constructor-time wiring).
    fn set_last_will(&mut self, topic: &str, payload: Vec<u8>, retain: bool, qos: Qos);

    /// Non-blocking check for a pending inbound message ("check_msg").
    async fn poll(&mut self) -> Result<Option<Message>, TransportError>;

    /// Blocks until a message arrives ("wait_msg"), used when the task
    /// table is empty (spec §4.4 main loop).
    async fn recv(&mut self) -> Result<Message, TransportError>;
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use std::collections::VecDeque;

    use super::*;

    /// An in-memory transport double for tests: `publish` is recorded,
    /// `poll`/`recv` drain a pre-seeded inbound queue.
    #[derive(Default)]
    pub struct FakeTransport {
        pub connected: bool,
        pub published: Vec<(String, Vec<u8>, bool, Qos)>,
        pub subscriptions: Vec<(String, Qos)>,
        pub last_will: Option<(String, Vec<u8>, bool, Qos)>,
        pub inbound: VecDeque<Message>,
        pub fail_connect: bool,
        pub fail_publish: bool,
    }

    impl FakeTransport {
        pub fn push_inbound(&mut self, message: Message) {
            self.inbound.push_back(message);
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn connect(&mut self) -> Result<(), TransportError> {
            if self.fail_connect {
                return Err(TransportError::Network("fake connect failure".to_string()));
            }
            self.connected = true;
            Ok(())
        }

        async fn disconnect(&mut self) -> Result<(), TransportError> {
            self.connected = false;
            Ok(())
        }

        async fn subscribe(&mut self, topic: &str, qos: Qos) -> Result<(), TransportError> {
            self.subscriptions.push((topic.to_string(), qos));
            Ok(())
        }

        async fn publish(
            &mut self,
            topic: &str,
            payload: Vec<u8>,
            retain: bool,
            qos: Qos,
        ) -> Result<(), TransportError> {
            if self.fail_publish {
                return Err(TransportError::Publish(topic.to_string(), "fake publish failure".to_string()));
            }
            self.published.push((topic.to_string(), payload, retain, qos));
            Ok(())
        }

        fn set_last_will(&mut self, topic: &str, payload: Vec<u8>, retain: bool, qos: Qos) {
            self.last_will = Some((topic.to_string(), payload, retain, qos));
        }

        async fn poll(&mut self) -> Result<Option<Message>, TransportError> {
            Ok(self.inbound.pop_front())
        }

        async fn recv(&mut self) -> Result<Message, TransportError> {
            self.inbound.pop_front().ok_or(TransportError::NotConnected)
        }
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
