// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the bootstrap binary.

use std::path::PathBuf;

/// Resolve state directory: `WOT_STATE_DIR` > `XDG_STATE_HOME/wot` > `~/.local/state/wot`.
pub fn state_dir() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var("WOT_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("wot"));
    }
    let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("neither WOT_STATE_DIR, XDG_STATE_HOME, nor HOME is set"))?;
    Ok(PathBuf::from(home).join(".local/state/wot"))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
