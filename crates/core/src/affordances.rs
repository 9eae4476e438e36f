// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Affordance Store (spec §4.3, C6): properties, event emission, and the
//! action registry. Topic derivation is the caller's job (via
//! `Identity`); this module knows values and names, never wire bytes —
//! encoding is the configured serializer's job, reached through the
//! [`Publisher`] port so this crate stays free of any concrete transport
//! or codec dependency.

use std::collections::HashMap;

use serde_json::Value;

use crate::diff::dict_diff;
use crate::error::PropertyError;
use crate::reserved::validate_affordance_name;
use crate::router::Router;

/// The narrow capability the store needs to push a value onto the bus.
/// `wot-runtime` implements this over a concrete `Transport` + `Codec`
/// pair; tests implement it over an in-memory `Vec`.
pub trait Publisher {
    fn publish(&mut self, topic: &str, payload: &Value, retain: bool, qos: u8) -> Result<(), String>;
}

/// The topic and delivery options a publish call needs, bundled so `set`
/// and `emit` don't carry three separate trailing parameters each.
#[derive(Debug, Clone, Copy)]
pub struct PublishTarget<'a> {
    pub topic: &'a str,
    pub retain: bool,
    pub qos: u8,
}

/// A stored property: its current value and the flags that govern how
/// `set` behaves.
#[derive(Debug, Clone)]
pub struct PropertyEntry {
    value: Value,
    uses_default_setter: bool,
    always_sync: bool,
}

impl PropertyEntry {
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn uses_default_setter(&self) -> bool {
        self.uses_default_setter
    }
}

fn type_tag(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Owns the property map and delegates action registration/resolution to
/// the [`Router`]. Events are stateless and carry no stored record.
pub struct AffordanceStore<H> {
    properties: HashMap<String, PropertyEntry>,
    router: Router<H>,
}

impl<H> Default for AffordanceStore<H> {
    fn default() -> Self {
        Self { properties: HashMap::new(), router: Router::new() }
    }
}

impl<H> AffordanceStore<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a property. `uses_default_setter` governs whether the
    /// built-in `set/<name>` core action may update it (spec §3, §4.5).
    pub fn create(
        &mut self,
        name: impl Into<String>,
        value: Value,
        uses_default_setter: bool,
    ) -> Result<(), PropertyError> {
        self.create_with_sync(name, value, uses_default_setter, false)
    }

    /// As [`Self::create`], additionally marking the property as
    /// `always_sync` — `set` republishes even when the effective value is
    /// unchanged (spec §9 open question, decided: equal-value `set` is a
    /// no-op unless the property opts into always-sync).
    pub fn create_with_sync(
        &mut self,
        name: impl Into<String>,
        value: Value,
        uses_default_setter: bool,
        always_sync: bool,
    ) -> Result<(), PropertyError> {
        let name = name.into();
        if self.properties.contains_key(&name) {
            return Err(PropertyError::DuplicateProperty(name));
        }
        self.properties.insert(
            name,
            PropertyEntry { value, uses_default_setter, always_sync },
        );
        Ok(())
    }

    /// Returns a deep copy of the stored value so callers cannot mutate the
    /// canonical state through an alias (spec §4.3).
    pub fn get(&self, name: &str) -> Result<Value, PropertyError> {
        self.properties
            .get(name)
            .map(|entry| entry.value.clone())
            .ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))
    }

    pub fn entry(&self, name: &str) -> Result<&PropertyEntry, PropertyError> {
        self.properties.get(name).ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))
    }

    /// Updates a property's value. Requires the property to exist and the
    /// new value's type to match the value it was created with. When the
    /// stored value is a structured object and `use_dict_diff` is set, only
    /// the diff is published and merged into the stored state; otherwise
    /// the full value is published. A publish failure leaves stored state
    /// unchanged.
    pub fn set(
        &mut self,
        name: &str,
        value: Value,
        use_dict_diff: bool,
        target: PublishTarget<'_>,
        publisher: &mut impl Publisher,
    ) -> Result<(), PropertyError> {
        let entry = self
            .properties
            .get(name)
            .ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))?;

        let expected = type_tag(&entry.value);
        let got = type_tag(&value);
        if expected != got {
            return Err(PropertyError::TypeMismatch { name: name.to_string(), expected, got });
        }

        if !entry.always_sync && entry.value == value {
            return Ok(());
        }

        let outgoing = if use_dict_diff && entry.value.is_object() && value.is_object() {
            dict_diff(&entry.value, &value)
        } else {
            value.clone()
        };

        publisher
            .publish(target.topic, &outgoing, target.retain, target.qos)
            .map_err(|e| PropertyError::PublishFailure(name.to_string(), e))?;

        if let Some(entry) = self.properties.get_mut(name) {
            entry.value = value;
        }
        Ok(())
    }

    /// Emits an event. Validates `name` against reserved segments and
    /// wildcard tokens; a publish failure is logged by the caller and does
    /// not propagate (spec §4.3: events are "ephemeral broadcast").
    pub fn emit(
        &self,
        name: &str,
        payload: &Value,
        runtime_name: &str,
        target: PublishTarget<'_>,
        publisher: &mut impl Publisher,
    ) -> Result<(), PropertyError> {
        validate_affordance_name(name, runtime_name)
            .map_err(|e| PropertyError::PublishFailure(name.to_string(), e.to_string()))?;
        publisher
            .publish(target.topic, payload, target.retain, target.qos)
            .map_err(|e| PropertyError::PublishFailure(name.to_string(), e))
    }

    pub fn register_action(&mut self, template: &str, handler: H) -> Result<(), crate::error::RouterError> {
        self.router.register(template, handler)
    }

    pub fn resolve_action<'a>(&self, uri: &'a str) -> Option<(&H, Vec<(String, &'a str)>)> {
        self.router.resolve(uri)
    }
}

#[cfg(test)]
#[path = "affordances_tests.rs"]
mod tests;
