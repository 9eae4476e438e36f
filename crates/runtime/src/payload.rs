// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User payload loading (spec §3.8, C9): a dynamically loaded `cdylib`
//! exposing one `extern "C"` entry point, the idiomatic-Rust analogue of
//! "user code delivered over the network and persisted on the device."
//! This is the one place in the workspace where `unsafe` is unavoidable —
//! calling across an FFI boundary into a library loaded at runtime — so
//! the workspace lint for it is `deny` rather than `forbid`, with the
//! unsafe block isolated to this module and justified inline.

use wot_core::AffordanceStore;

use crate::connector::ActionHandler;

/// The surface a loaded payload gets to register affordances through.
/// Deliberately narrower than `Connector` itself — a payload can add
/// properties and actions, not reach into transport or scheduler state.
pub struct RuntimeHandle<'a> {
    store: &'a mut AffordanceStore<ActionHandler>,
}

impl<'a> RuntimeHandle<'a> {
    pub fn new(store: &'a mut AffordanceStore<ActionHandler>) -> Self {
        Self { store }
    }

    pub fn store_mut(&mut self) -> &mut AffordanceStore<ActionHandler> {
        self.store
    }
}

/// Signature a loaded payload must export under the symbol
/// `thing_app_setup`. Returns 0 on success; any other value aborts
/// loading (the loader treats it as a [`PayloadError::SetupFailed`]).
type ThingAppSetup = unsafe extern "C" fn(handle: &mut RuntimeHandle) -> i32;

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("failed to load payload library: {0}")]
    Load(#[from] libloading::Error),

    #[error("payload is missing the `thing_app_setup` symbol: {0}")]
    MissingSymbol(libloading::Error),

    #[error("thing_app_setup returned failure code {0}")]
    SetupFailed(i32),
}

/// Loads `path` and invokes its `thing_app_setup` entry point with
/// `store`. The returned [`libloading::Library`] must be kept alive for
/// as long as anything it registered (trait objects, function pointers)
/// might still be called — callers hold onto it for the Thing's
/// lifetime.
///
/// # Safety invariant this relies on
/// `path` must point to a library built against this crate's current
/// `RuntimeHandle`/`AffordanceStore` ABI. A mismatched payload causes
/// undefined behavior on the call below; there is no way to check this
/// from Rust's side of an FFI boundary, which is exactly why the
/// workspace keeps `unsafe_code` at `deny` rather than `forbid` — this is
/// the single exception, load-bearing and spec-mandated (spec §3.8).
pub fn load_payload(
    path: impl AsRef<std::path::Path>,
    store: &mut AffordanceStore<ActionHandler>,
) -> Result<libloading::Library, PayloadError> {
    // SAFETY: see the function-level doc comment. The library is expected
    // to export `thing_app_setup` with the exact signature of
    // `ThingAppSetup`; loading an arbitrary `.so` here is inherently
    // unverifiable from Rust, which is the FFI boundary's nature.
    #[allow(unsafe_code)]
    unsafe {
        let library = libloading::Library::new(path.as_ref())?;
        let setup: libloading::Symbol<ThingAppSetup> =
            library.get(b"thing_app_setup").map_err(PayloadError::MissingSymbol)?;

        let mut handle = RuntimeHandle::new(store);
        let code = setup(&mut handle);
        if code != 0 {
            return Err(PayloadError::SetupFailed(code));
        }
        Ok(library)
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
