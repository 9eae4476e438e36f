// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structural diff used to minimize property-sync payloads (spec §4.3).
//!
//! Ported from the explicit-stack `iterative_dict_diff` in the original
//! runtime: recursion is avoided for the traversal itself so the algorithm
//! has a bounded stack footprint regardless of nesting depth. Deletions
//! (keys present in the old value but absent from the new one) are never
//! represented; empty nested objects left behind by the traversal are
//! pruned from the result.

use serde_json::{Map, Value};

/// One pending level of the traversal: the path to it, and the old/new
/// objects at that level.
type DiffStackEntry = (Vec<String>, Map<String, Value>, Map<String, Value>);

/// Computes the minimal mapping that, merged into `old`, yields `new`
/// restricted to the keys `new` still has (see spec §8, "Diff correctness").
pub fn dict_diff(old: &Value, new: &Value) -> Value {
    let empty = Map::new();
    let old_top = old.as_object().unwrap_or(&empty);
    let new_top = new.as_object().unwrap_or(&empty);

    let mut diff = Map::new();
    let mut stack: Vec<DiffStackEntry> = vec![(Vec::new(), old_top.clone(), new_top.clone())];

    while let Some((path, old_d, new_d)) = stack.pop() {
        for (key, new_val) in &new_d {
            match old_d.get(key) {
                None => insert_at_path(&mut diff, &path, key, new_val.clone()),
                Some(old_val) => match (old_val.as_object(), new_val.as_object()) {
                    (Some(old_obj), Some(new_obj)) => {
                        let mut child_path = path.clone();
                        child_path.push(key.clone());
                        stack.push((child_path, old_obj.clone(), new_obj.clone()));
                    }
                    _ => {
                        if new_val != old_val {
                            insert_at_path(&mut diff, &path, key, new_val.clone());
                        }
                    }
                },
            }
        }
    }

    prune_empty(&mut diff);
    Value::Object(diff)
}

fn insert_at_path(diff: &mut Map<String, Value>, path: &[String], key: &str, value: Value) {
    let mut container = diff;
    for segment in path {
        let entry = container.entry(segment.clone()).or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(child) = entry else { unreachable!("path segments always hold objects") };
        container = child;
    }
    container.insert(key.to_string(), value);
}

fn prune_empty(map: &mut Map<String, Value>) {
    let empty_keys: Vec<String> = map
        .iter_mut()
        .filter_map(|(k, v)| {
            if let Value::Object(child) = v {
                prune_empty(child);
                child.is_empty().then(|| k.clone())
            } else {
                None
            }
        })
        .collect();
    for key in empty_keys {
        map.remove(&key);
    }
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
