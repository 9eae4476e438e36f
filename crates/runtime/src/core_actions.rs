// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Core Action Set (spec §4.5, C7): firmware update, VFS ops, the default
//! property setter, and the `vfs/report` event payload the VFS ops always
//! emit (supplemented from `ssaHAL/ssa_modules/umqtt_core/_core_actions.py`'s
//! `_add_timestamp`, spec.md's distillation drops the timestamp but the
//! original always stamps the report with `{epoch, seconds}`).

use std::path::{Path, PathBuf};

use base64::Engine;
use serde_json::{json, Value};

use wot_core::{AffordanceStore, Clock, PropertyError, PublishTarget, Publisher};

use crate::error::ConnectorError;

/// Outcome of a VFS operation, always published as a report event
/// regardless of success (spec §4.5).
#[derive(Debug, Clone)]
pub struct VfsReport {
    pub action: &'static str,
    pub error: bool,
    pub message: String,
}

impl VfsReport {
    pub fn ok(action: &'static str) -> Self {
        Self { action, error: false, message: String::new() }
    }

    pub fn failed(action: &'static str, message: impl Into<String>) -> Self {
        Self { action, error: true, message: message.into() }
    }

    /// Adds the wall-clock fields the original always stamps onto the
    /// report, sourced from the Clock port rather than the platform's
    /// clock directly so it stays fake-clock testable.
    pub fn into_payload(self, clock: &impl Clock) -> Value {
        let epoch = clock.epoch_ms();
        json!({
            "action": self.action,
            "error": self.error,
            "message": self.message,
            "epoch": epoch,
            "seconds": epoch / 1000,
        })
    }
}

/// Filesystem-backed implementation of the VFS and firmware-update
/// actions. `vfs_root` is the directory the VFS ops are confined to;
/// `user/app.<app_ext>` under it is where `firmware_update` persists the
/// payload (spec §6 "Persistent state").
#[derive(Clone)]
pub struct CoreActions<Cl> {
    vfs_root: PathBuf,
    user_dir: PathBuf,
    app_ext: &'static str,
    clock: Cl,
}

impl<Cl: Clock> CoreActions<Cl> {
    pub fn new(vfs_root: impl Into<PathBuf>, app_ext: &'static str, clock: Cl) -> Self {
        let vfs_root = vfs_root.into();
        let user_dir = vfs_root.join("user");
        Self { vfs_root, user_dir, app_ext, clock }
    }

    pub fn clock(&self) -> &Cl {
        &self.clock
    }

    pub fn app_path(&self) -> PathBuf {
        self.user_dir.join(format!("app.{}", self.app_ext))
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, ConnectorError> {
        let rel = Path::new(path);
        if rel.is_absolute() || rel.components().any(|c| matches!(c, std::path::Component::ParentDir)) {
            return Err(ConnectorError::CoreAction(wot_core::CoreActionError::MalformedPayload(format!(
                "path `{path}` escapes the vfs root"
            ))));
        }
        Ok(self.vfs_root.join(rel))
    }

    /// `vfs/list` — a flat listing of `vfs_root`'s immediate entries.
    pub fn vfs_list(&self) -> Result<Value, ConnectorError> {
        let mut entries = Vec::new();
        if self.vfs_root.exists() {
            for entry in std::fs::read_dir(&self.vfs_root)? {
                let entry = entry?;
                let kind = if entry.file_type()?.is_dir() { "dir" } else { "file" };
                entries.push(json!({ "path": entry.file_name().to_string_lossy(), "type": kind }));
            }
        }
        Ok(Value::Array(entries))
    }

    /// `vfs/read` — raw bytes at `path`.
    pub fn vfs_read(&self, path: &str) -> Result<Vec<u8>, ConnectorError> {
        Ok(std::fs::read(self.resolve(path)?)?)
    }

    /// `vfs/write` — CRC-32-gated write, creating intermediate
    /// directories as needed. `algo` other than `"crc32"` is rejected
    /// without touching the filesystem.
    pub fn vfs_write(
        &self,
        path: &str,
        data: &[u8],
        expected_crc32: u32,
        algo: &str,
        append: bool,
    ) -> Result<(), ConnectorError> {
        if algo != "crc32" {
            return Err(ConnectorError::CoreAction(wot_core::CoreActionError::Unsupported(algo.to_string())));
        }
        let got = crc32fast::hash(data);
        if got != expected_crc32 {
            return Err(ConnectorError::CoreAction(wot_core::CoreActionError::IntegrityFailure {
                expected: expected_crc32,
                got,
            }));
        }
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if append {
            use std::io::Write;
            let mut file = std::fs::OpenOptions::new().create(true).append(true).open(&full)?;
            file.write_all(data)?;
        } else {
            std::fs::write(&full, data)?;
        }
        Ok(())
    }

    /// `vfs/delete`.
    pub fn vfs_delete(&self, path: &str) -> Result<(), ConnectorError> {
        std::fs::remove_file(self.resolve(path)?)?;
        Ok(())
    }

    /// `firmware_update` — decodes, CRC-checks, and on match writes to
    /// `user/app.<ext>`. Returns whether a soft reset should follow; the
    /// connector is what actually requests it (spec §8 scenarios 3/4).
    pub fn firmware_update(&self, base64_payload: &str, expected_crc32_hex: &str) -> Result<bool, ConnectorError> {
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(base64_payload)
            .map_err(|e| ConnectorError::CoreAction(wot_core::CoreActionError::MalformedPayload(e.to_string())))?;
        let expected = u32::from_str_radix(expected_crc32_hex, 16)
            .map_err(|e| ConnectorError::CoreAction(wot_core::CoreActionError::MalformedPayload(e.to_string())))?;
        let got = crc32fast::hash(&decoded);
        if got != expected {
            tracing::warn!(expected = format!("{expected:08x}"), got = format!("{got:08x}"), "firmware CRC mismatch, aborting");
            return Ok(false);
        }
        std::fs::create_dir_all(&self.user_dir)?;
        std::fs::write(self.app_path(), decoded)?;
        Ok(true)
    }
}

/// `set/<property>` — the default property setter. Rejects properties
/// that opted out via `uses_default_setter = false` before delegating to
/// the affordance store (spec §4.5).
pub fn apply_default_setter<H>(
    store: &mut AffordanceStore<H>,
    name: &str,
    value: Value,
    target: PublishTarget<'_>,
    publisher: &mut impl Publisher,
) -> Result<(), ConnectorError> {
    let entry = store.entry(name).map_err(wot_core::CoreActionError::Property)?;
    if !entry.uses_default_setter() {
        return Err(ConnectorError::CoreAction(wot_core::CoreActionError::Property(
            PropertyError::NotDefaultSettable(name.to_string()),
        )));
    }
    store.set(name, value, true, target, publisher).map_err(wot_core::CoreActionError::Property)?;
    Ok(())
}

#[cfg(test)]
#[path = "core_actions_tests.rs"]
mod tests;
