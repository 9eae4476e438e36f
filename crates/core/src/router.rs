// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! URI-template action router (spec §4.1, C2).
//!
//! A trie keyed by literal path segments, with at most one wildcard child
//! per node carrying the variable name bound at that position. Literal
//! children always win over the wildcard child during resolution.

use std::collections::HashMap;

use crate::error::RouterError;

const WILDCARD_KEY: &str = "*";

struct Node<H> {
    handler: Option<H>,
    var_name: Option<String>,
    children: HashMap<String, Node<H>>,
}

impl<H> Default for Node<H> {
    fn default() -> Self {
        Self { handler: None, var_name: None, children: HashMap::new() }
    }
}

/// A URI-template trie mapping action templates to handlers of type `H`.
pub struct Router<H> {
    root: HashMap<String, Node<H>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self { root: HashMap::new() }
    }
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` at `template`. The first segment must be a
    /// literal; re-registering an already-occupied template is rejected.
    pub fn register(&mut self, template: &str, handler: H) -> Result<(), RouterError> {
        let segments: Vec<&str> = template.split('/').collect();
        let Some(first) = segments.first() else {
            return Err(RouterError::InvalidTemplate(template.to_string()));
        };
        if first.starts_with('{') {
            return Err(RouterError::InvalidTemplate(template.to_string()));
        }

        let mut node = self
            .root
            .entry((*first).to_string())
            .or_default();

        for segment in &segments[1..] {
            let (key, var_name) = segment_key(segment);
            node = node.children.entry(key.to_string()).or_default();
            if let Some(name) = var_name {
                node.var_name = Some(name.to_string());
            }
        }

        if node.handler.is_some() {
            return Err(RouterError::DuplicateHandler(template.to_string()));
        }
        node.handler = Some(handler);
        Ok(())
    }

    /// Resolves `uri` against the trie, returning the handler and the
    /// ordered list of `(name, value)` path parameters bound along the way.
    pub fn resolve<'a>(&self, uri: &'a str) -> Option<(&H, Vec<(String, &'a str)>)> {
        if uri.is_empty() {
            return None;
        }
        let mut segments = uri.split('/');
        let first = segments.next()?;
        let mut node = self.root.get(first)?;
        let mut params = Vec::new();

        for segment in segments {
            if let Some(child) = node.children.get(segment) {
                node = child;
            } else if let Some(child) = node.children.get(WILDCARD_KEY) {
                let name = child.var_name.clone().unwrap_or_default();
                params.push((name, segment));
                node = child;
            } else {
                return None;
            }
        }

        node.handler.as_ref().map(|h| (h, params))
    }
}

/// Returns the trie key for a template segment: literal segments key
/// themselves, `{name}` segments key the shared wildcard slot and carry
/// their variable name.
fn segment_key(segment: &str) -> (&str, Option<&str>) {
    if let Some(name) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        (WILDCARD_KEY, Some(name))
    } else {
        (segment, None)
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
