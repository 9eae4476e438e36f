// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connector/Runtime lifecycle (spec §4.4, C8): the state machine that
//! takes a Thing from configured to running, the message demux, and the
//! core-action dispatch table. Modeled as an enum driving a `match`
//! rather than a trait-object state pattern — transitions are linear and
//! each carries distinct data, which fits a sum type better than dynamic
//! dispatch.

use std::path::PathBuf;
use std::time::Duration;

use base64::Engine;
use serde_json::Value;

use wot_core::{AffordanceStore, Clock, Config, Identity, PublishTarget, Publisher};
use wot_transport::{Codec, Message, Qos, Transport, TransportError};

use crate::core_actions::{apply_default_setter, CoreActions, VfsReport};
use crate::error::ConnectorError;
use crate::publisher::TransportPublisher;
use crate::scheduler::Scheduler;

/// A registered action's callback. Takes the decoded payload and the
/// ordered path parameters the router extracted; does not receive a
/// "runtime handle" argument (spec §9's "Dynamic callbacks" reshape note)
/// — a handler that needs runtime state captures it at registration time,
/// the idiomatic Rust closure-capture equivalent of passing a handle.
pub type ActionHandler = Box<dyn Fn(Value, Vec<(String, String)>) -> Result<(), String> + Send + Sync>;

/// Platform soft-reset port (spec §1: "the hardware clock/reset
/// primitives" are an external collaborator mentioned only at this
/// boundary; `wot-cli` supplies the platform-specific implementation).
pub trait Platform: Send {
    fn soft_reset(&mut self);
}

/// Used outside a real embedded target: logs the request instead of
/// actually rebooting.
#[derive(Debug, Default)]
pub struct LoggingPlatform;

impl Platform for LoggingPlatform {
    fn soft_reset(&mut self) {
        tracing::warn!("soft reset requested");
    }
}

/// The lifecycle states of spec §4.4. `Unconfigured` and the transition
/// into `Configured` happen before a `Connector` exists — config loading
/// is the bootstrap's job (`wot-cli`) — so a `Connector` is always
/// constructed already `Configured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorState {
    Configured,
    NetworkUp,
    BrokerUp,
    Running,
    Stopped,
}

/// Orchestrates one Thing's lifecycle: transport, codec, affordance
/// store, scheduler, and core actions, all owned by a single value per
/// spec §9 ("a single owning value created at boot"), never a hidden
/// global.
pub struct Connector<T, Cd, Cl: Clock, P> {
    identity: Identity,
    runtime_name: String,
    config: Config,
    transport: T,
    codec: Cd,
    clock: Cl,
    platform: P,
    store: AffordanceStore<ActionHandler>,
    scheduler: Scheduler<Cl>,
    core_actions: CoreActions<Cl>,
    state: ConnectorState,
}

impl<T, Cd, Cl, P> Connector<T, Cd, Cl, P>
where
    T: Transport,
    Cd: Codec,
    Cl: Clock + 'static,
    P: Platform,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        identity: Identity,
        runtime_name: impl Into<String>,
        config: Config,
        transport: T,
        codec: Cd,
        clock: Cl,
        platform: P,
        vfs_root: impl Into<PathBuf>,
        app_ext: &'static str,
    ) -> Self {
        let core_actions = CoreActions::new(vfs_root, app_ext, clock.clone());
        let scheduler = Scheduler::new(clock.clone());
        Self {
            identity,
            runtime_name: runtime_name.into(),
            config,
            transport,
            codec,
            clock,
            platform,
            store: AffordanceStore::new(),
            scheduler,
            core_actions,
            state: ConnectorState::Configured,
        }
    }

    pub fn state(&self) -> ConnectorState {
        self.state
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store_mut(&mut self) -> &mut AffordanceStore<ActionHandler> {
        &mut self.store
    }

    pub fn scheduler(&self) -> &Scheduler<Cl> {
        &self.scheduler
    }

    /// Where a user payload is expected to live, for bootstrap code
    /// deciding whether to call [`crate::load_payload`] before [`Self::activate`].
    pub fn app_path(&self) -> std::path::PathBuf {
        self.core_actions.app_path()
    }

    /// Configures the last-will message. Per the transport contract, this
    /// must be called before [`Self::bring_broker_up`] to take effect.
    pub fn configure_last_will(&mut self, payload: &Value, retain: bool, qos: Qos) -> Result<(), ConnectorError> {
        let bytes = self.codec.encode(payload)?;
        self.transport.set_last_will(&self.identity.last_will_topic(), bytes, retain, qos);
        Ok(())
    }

    /// *Configured → NetworkUp*. Network association (Wi-Fi join, DHCP) is
    /// an external collaborator at this abstraction level (spec §1:
    /// "transport-specific socket/TLS code" is out of scope); this
    /// transition exists for lifecycle fidelity and always succeeds.
    pub fn bring_network_up(&mut self) -> Result<(), ConnectorError> {
        self.state = ConnectorState::NetworkUp;
        Ok(())
    }

    /// *NetworkUp → BrokerUp* via the broker attach, retried with
    /// exponential backoff (spec §4.4). A shared `FnMut() -> Fut` retry
    /// helper can't express a future borrowing `&mut self.transport`
    /// across repeated calls, so the doubling-wait loop is written
    /// directly against `self` here instead.
    pub async fn bring_broker_up(&mut self, retries: u32, base_timeout: Duration) -> Result<(), ConnectorError> {
        let mut last_err = None;
        for n in 0..retries {
            match self.transport.connect().await {
                Ok(()) => {
                    self.state = ConnectorState::BrokerUp;
                    return Ok(());
                }
                Err(e) => {
                    let wait = base_timeout * 2u32.saturating_pow(n);
                    tracing::warn!(attempt = n + 1, %retries, error = %e, wait_ms = wait.as_millis() as u64, "broker attach failed, retrying");
                    last_err = Some(e);
                    tokio::time::sleep(wait).await;
                }
            }
        }
        Err(last_err.unwrap_or(TransportError::RetriesExhausted(retries)).into())
    }

    /// *BrokerUp → Running*: subscribes both action namespaces, and, when
    /// no user payload registered its own affordances, publishes
    /// registration in registration-only mode (spec §4.4, §6).
    pub async fn activate(&mut self, has_user_code: bool) -> Result<(), ConnectorError> {
        self.transport.subscribe(&self.identity.actions_model_filter(), Qos::AtLeastOnce).await?;
        self.transport
            .subscribe(&self.identity.actions_runtime_filter(&self.runtime_name), Qos::AtLeastOnce)
            .await?;
        if !has_user_code {
            self.publish_registration().await?;
        }
        self.state = ConnectorState::Running;
        Ok(())
    }

    /// Publishes retained registration at `ssa/registration/<runtime>`
    /// and, supplementing spec.md from the original source (`ssaHAL/ssa/
    /// core.py`'s `__connect`), the resolved config as a retained,
    /// connector-owned property at `<base>/properties/<runtime>/config`.
    async fn publish_registration(&mut self) -> Result<(), ConnectorError> {
        let payload = serde_json::to_value(&self.config).map_err(|e| ConnectorError::Serialize("config", e.to_string()))?;
        let bytes = self.codec.encode(&payload)?;

        let registration_topic = self.identity.registration_topic(&self.runtime_name);
        self.transport.publish(&registration_topic, bytes.clone(), true, Qos::AtLeastOnce).await?;

        let config_topic = format!("{}/properties/{}/config", self.identity.base_topic(), self.runtime_name);
        self.transport.publish(&config_topic, bytes, true, Qos::AtLeastOnce).await?;
        Ok(())
    }

    /// One iteration of the main loop (spec §4.4): when no task is live,
    /// block for the next message; otherwise poll non-blockingly and
    /// yield briefly so scheduled tasks get a turn.
    pub async fn step(&mut self) -> Result<(), ConnectorError> {
        let message = if self.scheduler.task_count() == 0 {
            Some(self.transport.recv().await?)
        } else {
            match self.transport.poll().await? {
                Some(message) => Some(message),
                None => {
                    tokio::time::sleep(Duration::from_millis(150)).await;
                    None
                }
            }
        };

        if let Some(message) = message {
            self.dispatch(message).await;
        }
        Ok(())
    }

    /// Demultiplexes an inbound message by topic prefix (spec §4.4, §6).
    pub async fn dispatch(&mut self, message: Message) {
        let Message { topic, payload, .. } = message;
        let base = self.identity.base_topic();
        let runtime_prefix = format!("{base}/actions/{}/", self.runtime_name);
        let model_prefix = format!("{base}/actions/{}/", self.identity.model_name());

        if let Some(suffix) = topic.strip_prefix(&runtime_prefix) {
            self.dispatch_core_action(suffix.to_string(), payload).await;
        } else if let Some(suffix) = topic.strip_prefix(&model_prefix) {
            self.dispatch_model_action(suffix, &payload);
        } else {
            tracing::warn!(%topic, "message on unrecognized topic, dropping");
        }
    }

    fn dispatch_model_action(&mut self, suffix: &str, payload_bytes: &[u8]) {
        let payload = match self.codec.decode(payload_bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(action = %suffix, error = %e, "failed to decode action payload");
                return;
            }
        };
        match self.store.resolve_action(suffix) {
            Some((handler, params)) => {
                let params: Vec<(String, String)> =
                    params.into_iter().map(|(name, value)| (name, value.to_string())).collect();
                if let Err(e) = handler(payload, params) {
                    tracing::warn!(action = %suffix, error = %e, "action handler failed");
                }
            }
            None => tracing::warn!(action = %suffix, "no handler registered for action"),
        }
    }

    /// Core actions are dispatched as the message arrives rather than as
    /// a separately spawned scheduler task: the filesystem work itself
    /// already runs on tokio's blocking thread pool via
    /// `spawn_blocking`, which keeps the main loop free without requiring
    /// the transport handle (owned uniquely by the connector, spec §5) to
    /// be shared across a spawned task.
    async fn dispatch_core_action(&mut self, suffix: String, payload_bytes: Vec<u8>) {
        let payload = match self.codec.decode(&payload_bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(action = %suffix, error = %e, "failed to decode core action payload");
                return;
            }
        };

        match suffix.as_str() {
            "firmware_update" => self.handle_firmware_update(payload).await,
            "vfs/list" | "vfs/read" | "vfs/write" | "vfs/delete" => {
                self.handle_vfs(suffix.clone(), payload).await
            }
            "reload" => self.handle_reload().await,
            _ if suffix.starts_with("set/") => self.handle_default_setter(&suffix["set/".len()..], payload),
            _ => tracing::warn!(action = %suffix, "unknown core action"),
        }
    }

    async fn handle_firmware_update(&mut self, payload: Value) {
        let (Some(b64), Some(crc_hex)) =
            (payload.get("base64").and_then(Value::as_str), payload.get("crc32").and_then(Value::as_str))
        else {
            tracing::warn!("firmware_update payload missing `base64` or `crc32`");
            return;
        };
        let (b64, crc_hex) = (b64.to_string(), crc_hex.to_string());
        let core_actions = self.core_actions.clone();

        match tokio::task::spawn_blocking(move || core_actions.firmware_update(&b64, &crc_hex)).await {
            Ok(Ok(true)) => {
                tracing::info!("firmware update accepted, requesting soft reset");
                self.platform.soft_reset();
            }
            Ok(Ok(false)) => tracing::warn!("firmware update rejected: CRC mismatch"),
            Ok(Err(e)) => tracing::warn!(error = %e, "firmware update failed"),
            Err(e) => tracing::warn!(error = %e, "firmware update task panicked"),
        }
    }

    async fn handle_vfs(&mut self, op: String, payload: Value) {
        let path = payload.get("path").and_then(Value::as_str).unwrap_or_default().to_string();
        let core_actions = self.core_actions.clone();

        let report = match op.as_str() {
            "vfs/list" => match tokio::task::spawn_blocking(move || core_actions.vfs_list()).await {
                Ok(Ok(listing)) => VfsReport { action: "vfs/list", error: false, message: listing.to_string() },
                Ok(Err(e)) => VfsReport::failed("vfs/list", e.to_string()),
                Err(e) => VfsReport::failed("vfs/list", e.to_string()),
            },
            "vfs/read" => match tokio::task::spawn_blocking(move || core_actions.vfs_read(&path)).await {
                Ok(Ok(bytes)) => VfsReport {
                    action: "vfs/read",
                    error: false,
                    message: base64::engine::general_purpose::STANDARD.encode(bytes),
                },
                Ok(Err(e)) => VfsReport::failed("vfs/read", e.to_string()),
                Err(e) => VfsReport::failed("vfs/read", e.to_string()),
            },
            "vfs/write" => match decode_write_fields(&payload) {
                Ok((data, crc, algo, append)) => {
                    match tokio::task::spawn_blocking(move || core_actions.vfs_write(&path, &data, crc, &algo, append))
                        .await
                    {
                        Ok(Ok(())) => VfsReport::ok("vfs/write"),
                        Ok(Err(e)) => VfsReport::failed("vfs/write", e.to_string()),
                        Err(e) => VfsReport::failed("vfs/write", e.to_string()),
                    }
                }
                Err(message) => VfsReport::failed("vfs/write", message),
            },
            "vfs/delete" => match tokio::task::spawn_blocking(move || core_actions.vfs_delete(&path)).await {
                Ok(Ok(())) => VfsReport::ok("vfs/delete"),
                Ok(Err(e)) => VfsReport::failed("vfs/delete", e.to_string()),
                Err(e) => VfsReport::failed("vfs/delete", e.to_string()),
            },
            _ => unreachable!("handle_vfs only called for vfs/* topics"),
        };

        self.emit_vfs_report(report);
    }

    fn emit_vfs_report(&mut self, report: VfsReport) {
        let topic = self.identity.vfs_report_topic(&self.runtime_name);
        let payload = report.into_payload(&self.clock);
        let mut publisher = TransportPublisher::new(&mut self.transport, &self.codec);
        if let Err(e) = publisher.publish(&topic, &payload, false, 0) {
            tracing::warn!(error = %e, "failed to publish vfs report");
        }
    }

    fn handle_default_setter(&mut self, name: &str, payload: Value) {
        let topic = self.identity.property_topic(name);
        let target = PublishTarget { topic: &topic, retain: true, qos: 1 };
        let mut publisher = TransportPublisher::new(&mut self.transport, &self.codec);
        if let Err(e) = apply_default_setter(&mut self.store, name, payload, target, &mut publisher) {
            tracing::warn!(property = %name, error = %e, "default setter failed");
        }
    }

    /// `reload`: disconnects and requests a soft reset (spec §4.4, §4.5).
    async fn handle_reload(&mut self) {
        if let Err(e) = self.transport.disconnect().await {
            tracing::warn!(error = %e, "disconnect before reload failed");
        }
        self.platform.soft_reset();
        self.state = ConnectorState::Stopped;
    }
}

fn decode_write_fields(payload: &Value) -> Result<(Vec<u8>, u32, String, bool), String> {
    let data = payload.get("data").and_then(Value::as_str).ok_or("vfs/write payload missing `data`")?;
    let crc_hex = payload.get("crc32").and_then(Value::as_str).ok_or("vfs/write payload missing `crc32`")?;
    let algo = payload.get("algo").and_then(Value::as_str).unwrap_or("crc32").to_string();
    let append = payload.get("append").and_then(Value::as_bool).unwrap_or(false);

    let bytes = base64::engine::general_purpose::STANDARD.decode(data).map_err(|e| e.to_string())?;
    let crc = u32::from_str_radix(crc_hex, 16).map_err(|e| e.to_string())?;
    Ok((bytes, crc, algo, append))
}

#[cfg(test)]
#[path = "connector_tests.rs"]
mod tests;
