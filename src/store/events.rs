// src/store/events.rs
//! Named-event dispatch table with exactly one callback per event.
//!
//! Binding an event that is already bound replaces the previous callback.
//! Triggering an unbound event is not an error: it reports "not handled".

use crate::error::{Result, SkeletonError};
use serde_json::Value;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Something that can be invoked when an event fires.
pub trait Handler {
    fn call(&self, args: &[Value]) -> Value;
}

impl<F> Handler for F
where
    F: Fn(&[Value]) -> Value,
{
    fn call(&self, args: &[Value]) -> Value {
        self(args)
    }
}

/// A bound callback. Weak callbacks stop being invocable once their owner drops.
#[derive(Clone)]
pub enum Callback {
    Strong(Rc<dyn Handler>),
    Weak(Weak<dyn Handler>),
}

impl Callback {
    pub fn new(handler: impl Handler + 'static) -> Self {
        Self::Strong(Rc::new(handler))
    }

    #[must_use]
    pub fn weak(handler: &Rc<dyn Handler>) -> Self {
        Self::Weak(Rc::downgrade(handler))
    }

    fn upgrade(&self) -> Option<Rc<dyn Handler>> {
        match self {
            Self::Strong(handler) => Some(Rc::clone(handler)),
            Self::Weak(handler) => handler.upgrade(),
        }
    }

    #[must_use]
    pub fn is_invocable(&self) -> bool {
        self.upgrade().is_some()
    }
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strong(_) => f.write_str("Callback::Strong"),
            Self::Weak(_) => f.write_str("Callback::Weak"),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Events {
    pool: HashMap<String, Callback>,
}

impl Events {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for `event`, replacing any previous one.
    ///
    /// # Errors
    /// Returns `InvalidCallback` if the callback can no longer be invoked.
    pub fn bind(&mut self, event: &str, callback: Callback) -> Result<&mut Self> {
        if !callback.is_invocable() {
            return Err(SkeletonError::InvalidCallback {
                event: event.to_string(),
            });
        }
        self.pool.insert(event.to_string(), callback);
        Ok(self)
    }

    /// Fires `event`. `Ok(None)` means nothing was bound to it.
    ///
    /// # Errors
    /// Returns `InvalidArgument` when no event name is given.
    pub fn trigger(&self, event: &str, args: &[Value]) -> Result<Option<Value>> {
        if event.is_empty() {
            return Err(SkeletonError::InvalidArgument(
                "empty trigger params, need at least an event name".to_string(),
            ));
        }
        let Some(handler) = self.pool.get(event).and_then(Callback::upgrade) else {
            return Ok(None);
        };
        Ok(Some(handler.call(args)))
    }

    #[must_use]
    pub fn bound(&self, event: &str) -> bool {
        self.pool.get(event).is_some_and(Callback::is_invocable)
    }
}

/// A component that declares callbacks it wants installed on other tables.
pub trait Listener {
    fn events(&self) -> Vec<(String, Callback)> {
        Vec::new()
    }

    /// Installs every declared callback on `target`, skipping dead ones.
    fn listen(&self, target: &mut Events) {
        for (event, callback) in self.events() {
            if !callback.is_invocable() {
                continue;
            }
            let _ = target.bind(&event, callback);
        }
    }
}
