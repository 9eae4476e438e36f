// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reserved path segments and wildcard tokens that user-defined affordances
//! may not collide with.

/// Path segments reserved by the runtime's own topic namespaces.
pub const RESERVED_SEGMENTS: &[&str] = &["vfs", "ssa", "events", "actions", "properties"];

/// MQTT wildcard tokens forbidden in event and action names.
pub const WILDCARD_TOKENS: &[&str] = &["#", "+"];

/// Returns true if `segment` collides with a runtime-reserved namespace
/// segment or the given runtime name.
pub fn is_reserved_segment(segment: &str, runtime_name: &str) -> bool {
    RESERVED_SEGMENTS.contains(&segment) || segment == runtime_name
}

/// Returns true if `name` contains an MQTT wildcard token anywhere in its
/// path segments.
pub fn contains_wildcard(name: &str) -> bool {
    name.split('/').any(|segment| WILDCARD_TOKENS.contains(&segment))
}

/// Validates an event or action name against the reserved-segment and
/// wildcard rules (spec §3: "Event"/"Action" invariants, extended per the
/// CityLink source to cover action URIs as well as event names).
pub fn validate_affordance_name(
    name: &str,
    runtime_name: &str,
) -> Result<(), crate::error::AffordanceNameError> {
    if contains_wildcard(name) {
        return Err(crate::error::AffordanceNameError::Wildcard(name.to_string()));
    }
    let first = name.split('/').next().unwrap_or("");
    if is_reserved_segment(first, runtime_name) {
        return Err(crate::error::AffordanceNameError::ReservedSegment(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "reserved_tests.rs"]
mod tests;
