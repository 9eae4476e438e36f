// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `wotd` — boots a [`wot_runtime::Connector`] from a TOML config, brings
//! the network and broker links up, loads an optional user payload, and
//! drives the main loop to completion.

mod config;
mod env;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use wot_core::{Config as DeviceConfig, Identity, SystemClock, Version};
use wot_runtime::{load_payload, Connector, LoggingPlatform};
use wot_transport::{JsonCodec, MqttConfig, MqttTransport};

type DeviceConnector = Connector<MqttTransport, JsonCodec, SystemClock, LoggingPlatform>;

const DEFAULT_RUNTIME_NAME: &str = "ssa";

/// Boots a Web-of-Things runtime Thing from a TOML configuration.
#[derive(Debug, Parser)]
#[command(name = "wotd", version, about)]
struct Args {
    /// Base configuration file.
    #[arg(long, value_name = "PATH")]
    config: PathBuf,

    /// Optional secrets file layered on top of `--config` (later wins).
    #[arg(long, value_name = "PATH")]
    secrets: Option<PathBuf>,

    /// Overrides the state directory (`WOT_STATE_DIR` / `XDG_STATE_HOME`).
    #[arg(long, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Name the core action set is routed under (`<base>/actions/<name>/#`).
    #[arg(long, default_value = DEFAULT_RUNTIME_NAME)]
    runtime_name: String,

    /// File extension a user payload `cdylib` is expected to carry.
    #[arg(long, default_value = "so")]
    app_ext: String,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

fn load_config(args: &Args) -> anyhow::Result<DeviceConfig> {
    let mut paths = vec![args.config.clone()];
    if let Some(secrets) = &args.secrets {
        paths.push(secrets.clone());
    }
    let tables = config::read_tables(&paths)?;
    Ok(DeviceConfig::merge_and_validate(tables)?)
}

fn build_connector(
    device_config: DeviceConfig,
    state_dir: &std::path::Path,
    runtime_name: String,
    app_ext: &'static str,
) -> DeviceConnector {
    let identity = Identity::new(
        device_config.tm.name.clone(),
        device_config.runtime.broker.client_id.clone(),
        Version { model: device_config.tm.name.clone(), instance: device_config.tm.version.instance.clone() },
    );

    let mqtt_config = MqttConfig {
        client_id: device_config.runtime.broker.client_id.clone(),
        host: device_config.runtime.broker.ipv4.clone(),
        port: device_config.runtime.broker.port,
        username: device_config.runtime.broker.username.clone(),
        password: device_config.runtime.broker.password.clone(),
        keepalive: Duration::from_secs(device_config.runtime.broker.keepalive as u64),
        clean_session: device_config.runtime.broker.clean_session,
    };
    let transport = MqttTransport::new(mqtt_config);

    let vfs_root = state_dir.join("vfs");
    Connector::new(
        identity,
        runtime_name,
        device_config,
        transport,
        JsonCodec,
        SystemClock,
        LoggingPlatform,
        vfs_root,
        app_ext,
    )
}

/// Drives the Thing from `Configured` through to `Running`, mirroring
/// `startup()`'s numbered-step, tracing-heavy bootstrap shape.
async fn bring_up(connector: &mut DeviceConnector) -> anyhow::Result<()> {
    // 1. Network association is out of scope here (spec §1) — always succeeds.
    connector.bring_network_up()?;
    tracing::info!("network link up");

    // 2. Broker attach, retried with exponential backoff per the config's
    //    connection section.
    let retries = connector.config().runtime.connection.retries;
    let timeout = Duration::from_millis(connector.config().runtime.connection.timeout_ms);
    connector.bring_broker_up(retries, timeout).await?;
    tracing::info!("broker link up");

    // 3. Try loading a previously-persisted user payload; its absence is
    //    normal on first boot, not an error.
    let payload_path = connector.app_path();
    let has_user_code = match load_payload(&payload_path, connector.store_mut()) {
        Ok(library) => {
            tracing::info!(path = %payload_path.display(), "user payload loaded");
            // Kept alive for the Thing's lifetime: anything the payload
            // registered (closures, function pointers) must stay valid.
            std::mem::forget(library);
            true
        }
        Err(e) => {
            tracing::info!(path = %payload_path.display(), error = %e, "no user payload loaded");
            false
        }
    };

    // 4. Subscribe and, if the Thing has nothing of its own, register with
    //    the fleet controller.
    connector.activate(has_user_code).await?;
    tracing::info!(has_user_code, "activated");
    Ok(())
}

async fn run(args: Args) -> anyhow::Result<()> {
    let device_config = load_config(&args)?;
    let state_dir = match &args.state_dir {
        Some(dir) => dir.clone(),
        None => env::state_dir()?,
    };
    std::fs::create_dir_all(&state_dir)?;

    // Leaked once at startup: `CoreActions` needs a `&'static str` and the
    // process runs for the Thing's whole lifetime, so this is bounded.
    let app_ext: &'static str = Box::leak(args.app_ext.clone().into_boxed_str());
    let mut connector = build_connector(device_config, &state_dir, args.runtime_name.clone(), app_ext);

    bring_up(&mut connector).await?;

    loop {
        connector.step().await?;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    run(args).await
}
