// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concrete MQTT `Transport`, backed by `rumqttc`.

use std::time::Duration;

use async_trait::async_trait;
use rumqttc::{AsyncClient, Event, Incoming, LastWill, MqttOptions, Packet, QoS as RumqttQos};

use crate::error::TransportError;
use crate::message::{Message, Qos};
use crate::transport::Transport;

fn to_rumqtt_qos(qos: Qos) -> RumqttQos {
    match qos {
        Qos::AtMostOnce => RumqttQos::AtMostOnce,
        Qos::AtLeastOnce => RumqttQos::AtLeastOnce,
        Qos::ExactlyOnce => RumqttQos::ExactlyOnce,
    }
}

fn from_rumqtt_qos(qos: RumqttQos) -> Qos {
    match qos {
        RumqttQos::AtMostOnce => Qos::AtMostOnce,
        RumqttQos::AtLeastOnce => Qos::AtLeastOnce,
        RumqttQos::ExactlyOnce => Qos::ExactlyOnce,
    }
}

/// Parameters needed to build a broker connection (spec §6, `runtime.broker`).
pub struct MqttConfig {
    pub client_id: String,
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub keepalive: Duration,
    pub clean_session: bool,
}

/// Wraps `rumqttc::AsyncClient` + `EventLoop`. The client is built lazily
/// on the first `connect()` so `set_last_will` — which rumqttc only
/// accepts on `MqttOptions` before the client exists — can still take
/// effect when called first, matching the "configured once before
/// connect()" contract (spec §6, supplemented from
/// `ssaHAL/ssa_modules/mqtt.py`).
pub struct MqttTransport {
    config: MqttConfig,
    last_will: Option<(String, Vec<u8>, bool, Qos)>,
    client: Option<(AsyncClient, rumqttc::EventLoop)>,
}

impl MqttTransport {
    pub fn new(config: MqttConfig) -> Self {
        Self { config, last_will: None, client: None }
    }

    fn build_options(&self) -> MqttOptions {
        let mut options =
            MqttOptions::new(self.config.client_id.clone(), self.config.host.clone(), self.config.port);
        options.set_keep_alive(self.config.keepalive);
        options.set_clean_session(self.config.clean_session);
        if let (Some(username), Some(password)) = (&self.config.username, &self.config.password) {
            options.set_credentials(username.clone(), password.clone());
        }
        if let Some((topic, payload, retain, qos)) = &self.last_will {
            options.set_last_will(LastWill::new(topic, payload.clone(), to_rumqtt_qos(*qos), *retain));
        }
        options
    }

    async fn next_publish(&mut self) -> Result<Option<Message>, TransportError> {
        let Some((_, eventloop)) = &mut self.client else {
            return Err(TransportError::NotConnected);
        };
        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Incoming::Publish(publish))) => {
                    return Ok(Some(Message {
                        topic: publish.topic,
                        payload: publish.payload.to_vec(),
                        retain: publish.retain,
                        qos: from_rumqtt_qos(publish.qos),
                    }))
                }
                Ok(Event::Incoming(Packet::Disconnect)) => return Ok(None),
                Ok(_) => continue,
                Err(e) => return Err(TransportError::Broker(e.to_string())),
            }
        }
    }
}

#[async_trait]
impl Transport for MqttTransport {
    async fn connect(&mut self) -> Result<(), TransportError> {
        if self.client.is_none() {
            let options = self.build_options();
            self.client = Some(AsyncClient::new(options, 64));
        }
        let Some((_, eventloop)) = &mut self.client else {
            return Err(TransportError::NotConnected);
        };
        eventloop.poll().await.map(|_| ()).map_err(|e| TransportError::Network(e.to_string()))
    }

    async fn disconnect(&mut self) -> Result<(), TransportError> {
        let Some((client, _)) = &self.client else {
            return Ok(());
        };
        client.disconnect().await.map_err(|e| TransportError::Broker(e.to_string()))
    }

    async fn subscribe(&mut self, topic: &str, qos: Qos) -> Result<(), TransportError> {
        let Some((client, _)) = &self.client else {
            return Err(TransportError::NotConnected);
        };
        client
            .subscribe(topic, to_rumqtt_qos(qos))
            .await
            .map_err(|e| TransportError::Subscribe(topic.to_string(), e.to_string()))
    }

    async fn publish(
        &mut self,
        topic: &str,
        payload: Vec<u8>,
        retain: bool,
        qos: Qos,
    ) -> Result<(), TransportError> {
        let Some((client, _)) = &self.client else {
            return Err(TransportError::NotConnected);
        };
        client
            .publish(topic, to_rumqtt_qos(qos), retain, payload)
            .await
            .map_err(|e| TransportError::Publish(topic.to_string(), e.to_string()))
    }

    fn set_last_will(&mut self, topic: &str, payload: Vec<u8>, retain: bool, qos: Qos) {
        self.last_will = Some((topic.to_string(), payload, retain, qos));
    }

    async fn poll(&mut self) -> Result<Option<Message>, TransportError> {
        tokio::select! {
            result = self.next_publish() => result,
            _ = tokio::time::sleep(Duration::from_millis(1)) => Ok(None),
        }
    }

    async fn recv(&mut self) -> Result<Message, TransportError> {
        loop {
            if let Some(message) = self.next_publish().await? {
                return Ok(message);
            }
        }
    }
}
