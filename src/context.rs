//! Request-scoped context.
//!
//! # Responsibilities
//! - Carry the parent (runtime) metadata into the request unchanged
//! - Store library values under typed, named keys
//!
//! # Design Decisions
//! - Values are looked up by key name AND value type, so two crates using
//!   the same name cannot read each other's values
//! - Deriving a context never mutates the parent; values are shared via `Arc`
//! - Deadlines are informational; observing them is the handler's job

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Typed key for a value stored in a [`Context`].
pub struct ContextKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ContextKey<T> {
    /// Create a key with the given name.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for ContextKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContextKey<T> {}

impl<T> fmt::Debug for ContextKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContextKey").field(&self.name).finish()
    }
}

type Slot = (&'static str, TypeId);

/// Context attached to every request handed to a handler.
#[derive(Clone, Default)]
pub struct Context {
    values: HashMap<Slot, Arc<dyn Any + Send + Sync>>,
    request_id: Option<String>,
    deadline: Option<Instant>,
}

impl Context {
    /// Empty root context.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context carrying `value` under `key`.
    pub fn with_value<T>(mut self, key: &ContextKey<T>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        self.values
            .insert((key.name, TypeId::of::<T>()), Arc::new(value));
        self
    }

    /// Look up the value stored under `key`.
    pub fn value<T: 'static>(&self, key: &ContextKey<T>) -> Option<&T> {
        self.values
            .get(&(key.name, TypeId::of::<T>()))
            .and_then(|v| v.downcast_ref::<T>())
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Invocation id assigned by the runtime, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline; zero once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.values.keys().map(|(name, _)| *name).collect();
        f.debug_struct("Context")
            .field("keys", &keys)
            .field("request_id", &self.request_id)
            .field("deadline", &self.deadline)
            .finish()
    }
}
