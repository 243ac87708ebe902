//! The key-tree handler store: compiled handlers keyed by property path.
//!
//! An ordered multi-map from dotted model keys to handler lists. Dispatching
//! a key runs every handler registered under that exact key and under its
//! dotted descendants — running `"person"` also runs `"person.name"` — in
//! key order, registration order within a key.

use tracing::trace;

use crate::binding::handlers::Handler;
use crate::binding::BindTarget;
use crate::dom::node::NodeId;
use crate::value::Value;

use std::collections::BTreeMap;

/// Compiled handlers, keyed by model property path.
#[derive(Default)]
pub struct HandlerStore {
    handlers: BTreeMap<String, Vec<Handler>>,
}

impl std::fmt::Debug for HandlerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerStore")
            .field(
                "handlers",
                &self
                    .handlers
                    .iter()
                    .map(|(key, list)| (key.as_str(), list.len()))
                    .collect::<BTreeMap<_, _>>(),
            )
            .finish()
    }
}

impl HandlerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under `key`. One key may own many handlers; they
    /// run in registration order.
    pub fn add(&mut self, key: impl Into<String>, handler: Handler) {
        self.handlers.entry(key.into()).or_default().push(handler);
    }

    /// Dispatch a value change: run every handler registered under `key` or
    /// a dotted descendant of it, passing `key` through as the key name.
    pub fn run(&mut self, dom: &mut dyn BindTarget, key: &str, root: NodeId, value: &Value) {
        let prefix = format!("{key}.");
        let mut ran = 0usize;
        for (registered, handlers) in self.handlers.iter_mut() {
            if registered != key && !registered.starts_with(&prefix) {
                continue;
            }
            for handler in handlers.iter_mut() {
                handler.apply(dom, root, value, key);
                ran += 1;
            }
        }
        trace!(key, handlers = ran, "dispatched value change");
    }

    /// Number of handlers registered under exactly `key`.
    pub fn handler_count(&self, key: &str) -> usize {
        self.handlers.get(key).map(Vec::len).unwrap_or(0)
    }

    /// Registered keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Total number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    /// Whether no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
