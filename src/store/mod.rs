// src/store/mod.rs
//! Configuration and event store shared by the generator components.
//!
//! A [`Store`] pairs a nested [`ConfigTree`] with an [`Events`] table. Engine
//! settings live in the tree; capabilities the generator does not own (where a
//! class lives on disk, where log lines go) are reached through events.

pub mod events;
pub mod tree;

pub use events::{Callback, Events, Handler, Listener};
pub use tree::{merge, ConfigTree};

use crate::error::Result;
use serde_json::Value;

/// Event fired to recover a class's source file from its identifier.
pub const FIND_CLASS_PATH: &str = "find_class_path";

/// Observability event: `log(category, message[, level])`.
pub const LOG: &str = "log";

#[derive(Debug, Clone)]
pub struct Store {
    config: ConfigTree,
    events: Events,
}

impl Store {
    #[must_use]
    pub fn new(owner: &'static str) -> Self {
        Self {
            config: ConfigTree::new(owner),
            events: Events::new(),
        }
    }

    pub fn configure(&mut self, overrides: Value) -> &mut Self {
        self.config.configure(overrides);
        self
    }

    pub fn clear_conf(&mut self) -> &mut Self {
        self.config.clear();
        self
    }

    #[must_use]
    pub fn config(&self) -> &ConfigTree {
        &self.config
    }

    #[must_use]
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut Events {
        &mut self.events
    }

    /// # Errors
    /// Returns `InvalidCallback` if the callback is dead.
    pub fn bind(&mut self, event: &str, callback: Callback) -> Result<&mut Self> {
        self.events.bind(event, callback)?;
        Ok(self)
    }

    /// # Errors
    /// Returns `InvalidArgument` on an empty event name.
    pub fn trigger(&self, event: &str, args: &[Value]) -> Result<Option<Value>> {
        self.events.trigger(event, args)
    }

    #[must_use]
    pub fn bound(&self, event: &str) -> bool {
        self.events.bound(event)
    }

    /// Fires the `log` event. Unbound logging is a no-op.
    pub fn log(&self, category: &str, message: &str) {
        let _ = self.trigger(LOG, &[Value::from(category), Value::from(message)]);
    }

    /// Fires the `log` event with an explicit level.
    pub fn log_at(&self, category: &str, message: &str, level: &str) {
        let _ = self.trigger(
            LOG,
            &[
                Value::from(category),
                Value::from(message),
                Value::from(level),
            ],
        );
    }
}
