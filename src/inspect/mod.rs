// src/inspect/mod.rs
//! Structural introspection of classes.

mod php;
mod scan;

pub use php::{declared_namespace, PhpInspector};

use crate::error::Result;
use serde::Serialize;

/// Separator between namespace segments and the class name.
pub const NAMESPACE_SEPARATOR: char = '\\';

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodInfo {
    pub name: String,
    pub declaring_class: String,
    pub doc_comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassInfo {
    pub name: String,
    pub parent: Option<String>,
    pub doc_comment: Option<String>,
    /// Own methods first, then inherited ones that are not overridden.
    pub methods: Vec<MethodInfo>,
}

pub trait Inspect {
    /// Whether the class is known to the runtime at all.
    fn exists(&self, identifier: &str) -> bool;

    /// # Errors
    /// Returns `Introspection` when the class cannot be inspected.
    fn inspect(&self, identifier: &str) -> Result<ClassInfo>;
}

/// Final segment of a namespaced identifier.
#[must_use]
pub fn short_name(identifier: &str) -> &str {
    identifier
        .rsplit(NAMESPACE_SEPARATOR)
        .next()
        .unwrap_or(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("Foo"), "Foo");
        assert_eq!(short_name("App\\Model\\Foo"), "Foo");
        assert_eq!(short_name(""), "");
    }
}
