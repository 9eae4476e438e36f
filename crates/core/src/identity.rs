// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thing identity and the topic prefixes it derives (spec §3: "Thing
//! identity").

use serde::{Deserialize, Serialize};

/// The model/instance version pair carried in a Thing's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub model: String,
    pub instance: String,
}

/// Immutable triple `(model-name, instance-uuid, version)` fixed at boot.
///
/// Everything that derives a topic does so from this value; nothing else
/// in the runtime carries its own notion of "who am I".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    model_name: String,
    instance_uuid: String,
    version: Version,
}

impl Identity {
    pub fn new(model_name: impl Into<String>, instance_uuid: impl Into<String>, version: Version) -> Self {
        Self { model_name: model_name.into(), instance_uuid: instance_uuid.into(), version }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn instance_uuid(&self) -> &str {
        &self.instance_uuid
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// `<model>/<uuid>` — the prefix every other topic builds on.
    pub fn base_topic(&self) -> String {
        format!("{}/{}", self.model_name, self.instance_uuid)
    }

    /// `<base>/events/<model>/<event-name>`
    pub fn event_topic(&self, event_name: &str) -> String {
        format!("{}/events/{}/{}", self.base_topic(), self.model_name, event_name)
    }

    /// `<base>/properties/<model>/<property-name>`
    pub fn property_topic(&self, property_name: &str) -> String {
        format!("{}/properties/{}/{}", self.base_topic(), self.model_name, property_name)
    }

    /// `<base>/actions/<model>/#` — the subscription filter for user actions.
    pub fn actions_model_filter(&self) -> String {
        format!("{}/actions/{}/#", self.base_topic(), self.model_name)
    }

    /// `<base>/actions/<runtime-name>/#` — the subscription filter for core actions.
    pub fn actions_runtime_filter(&self, runtime_name: &str) -> String {
        format!("{}/actions/{}/#", self.base_topic(), runtime_name)
    }

    /// `<base>/events/<runtime-name>/vfs/report`
    pub fn vfs_report_topic(&self, runtime_name: &str) -> String {
        format!("{}/events/{}/vfs/report", self.base_topic(), runtime_name)
    }

    /// `ssa/registration/<runtime-name>` (retained, QoS 1 per spec §6).
    pub fn registration_topic(&self, runtime_name: &str) -> String {
        format!("ssa/registration/{runtime_name}")
    }

    /// `<base>/last_will`
    pub fn last_will_topic(&self) -> String {
        format!("{}/last_will", self.base_topic())
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
