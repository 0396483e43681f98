// src/classpath.rs
//! Registry of known class source files.
//!
//! Populated incrementally while resolving inputs and never cleared during a
//! run. The generator reaches it through the `find_class_path` event, never by
//! holding the map directly.

use crate::store::{Callback, Listener, FIND_CLASS_PATH};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Answers "where does this class live on disk".
pub trait ClassLookup {
    fn lookup(&self, identifier: &str) -> Option<PathBuf>;
}

/// Shared handle over the identifier -> source path map.
#[derive(Debug, Clone, Default)]
pub struct ClassPaths {
    inner: Rc<RefCell<HashMap<String, PathBuf>>>,
}

impl ClassPaths {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, identifier: &str, path: &Path) {
        self.inner
            .borrow_mut()
            .insert(identifier.to_string(), path.to_path_buf());
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.inner.borrow().contains_key(identifier)
    }

    /// Callback answering `find_class_path(identifier)` with a path string,
    /// or `null` for unknown identifiers.
    #[must_use]
    pub fn callback(&self) -> Callback {
        let paths = self.clone();
        Callback::new(move |args: &[Value]| {
            args.first()
                .and_then(Value::as_str)
                .and_then(|identifier| paths.lookup(identifier))
                .map_or(Value::Null, |path| {
                    Value::String(path.to_string_lossy().into_owned())
                })
        })
    }
}

impl ClassLookup for ClassPaths {
    fn lookup(&self, identifier: &str) -> Option<PathBuf> {
        let map = self.inner.borrow();
        if let Some(path) = map.get(identifier) {
            return Some(path.clone());
        }
        // Class names are case-insensitive.
        map.iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(identifier))
            .map(|(_, path)| path.clone())
    }
}

impl Listener for ClassPaths {
    fn events(&self) -> Vec<(String, Callback)> {
        vec![(FIND_CLASS_PATH.to_string(), self.callback())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Events;
    use serde_json::json;

    #[test]
    fn test_lookup_is_shared_between_handles() {
        let paths = ClassPaths::new();
        let other = paths.clone();
        paths.record("App\\Foo", Path::new("/src/App/Foo.php"));

        assert_eq!(other.lookup("App\\Foo"), Some(PathBuf::from("/src/App/Foo.php")));
        assert_eq!(other.lookup("app\\foo"), Some(PathBuf::from("/src/App/Foo.php")));
        assert!(other.lookup("App\\Bar").is_none());
    }

    #[test]
    fn test_listen_binds_find_class_path() {
        let paths = ClassPaths::new();
        let mut events = Events::new();
        paths.listen(&mut events);

        assert_eq!(
            events.trigger(FIND_CLASS_PATH, &[json!("Foo")]).unwrap(),
            Some(Value::Null)
        );

        paths.record("Foo", Path::new("lib/Foo.php"));
        assert_eq!(
            events.trigger(FIND_CLASS_PATH, &[json!("Foo")]).unwrap(),
            Some(json!("lib/Foo.php"))
        );
    }
}
