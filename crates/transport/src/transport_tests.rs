// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::fake::FakeTransport;
use super::*;

#[tokio::test]
async fn fake_transport_records_publishes() {
    let mut transport = FakeTransport::default();
    transport.connect().await.unwrap();
    transport.publish("a/b", b"hi".to_vec(), true, Qos::AtLeastOnce).await.unwrap();
    assert_eq!(transport.published.len(), 1);
    assert_eq!(transport.published[0].0, "a/b");
}

#[tokio::test]
async fn fake_transport_poll_drains_seeded_inbound_queue() {
    let mut transport = FakeTransport::default();
    transport.push_inbound(Message { topic: "t".to_string(), payload: vec![1], retain: false, qos: Qos::AtMostOnce });
    let msg = transport.poll().await.unwrap();
    assert_eq!(msg.unwrap().topic, "t");
    assert!(transport.poll().await.unwrap().is_none());
}
