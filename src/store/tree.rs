// src/store/tree.rs
//! Nested configuration tree with recursive merge and strict lookup.

use crate::error::{Result, SkeletonError};
use serde_json::{Map, Value};

/// Recursively merges `overrides` into `base`.
///
/// Objects present on both sides are merged key by key. Any other value in
/// `overrides` replaces the one in `base` (arrays included).
pub fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(over_map)) => {
            for (key, value) in over_map {
                match base_map.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Returns true when merging `value` would change nothing.
#[must_use]
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Configuration tree owned by a named component.
#[derive(Debug, Clone)]
pub struct ConfigTree {
    owner: &'static str,
    root: Value,
}

impl ConfigTree {
    #[must_use]
    pub fn new(owner: &'static str) -> Self {
        Self {
            owner,
            root: Value::Object(Map::new()),
        }
    }

    pub fn configure(&mut self, overrides: Value) -> &mut Self {
        if is_empty(&overrides) {
            return self;
        }
        merge(&mut self.root, overrides);
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.root = Value::Object(Map::new());
        self
    }

    /// Strict lookup of a nested key path.
    ///
    /// # Errors
    /// Returns `MissingConfiguration` naming the owner and the dotted path when
    /// any segment is absent.
    pub fn get_or_fail(&self, path: &[&str]) -> Result<&Value> {
        let mut node = &self.root;
        for segment in path {
            node = node
                .as_object()
                .and_then(|map| map.get(*segment))
                .filter(|value| !value.is_null())
                .ok_or_else(|| self.missing(path))?;
        }
        Ok(node)
    }

    /// Lenient lookup: any missing segment yields `default`.
    #[must_use]
    pub fn get<'a>(&'a self, path: &[&str], default: &'a Value) -> &'a Value {
        self.get_or_fail(path).unwrap_or(default)
    }

    /// Strict lookup of a string leaf.
    ///
    /// # Errors
    /// Returns `MissingConfiguration` when the path is absent, `InvalidArgument`
    /// when the leaf is not a string.
    pub fn get_str(&self, path: &[&str]) -> Result<&str> {
        self.get_or_fail(path)?.as_str().ok_or_else(|| {
            SkeletonError::InvalidArgument(format!(
                "configuration {}.{} must be a string",
                self.owner,
                path.join(".")
            ))
        })
    }

    fn missing(&self, path: &[&str]) -> SkeletonError {
        SkeletonError::MissingConfiguration {
            owner: self.owner,
            path: path.join("."),
        }
    }
}
