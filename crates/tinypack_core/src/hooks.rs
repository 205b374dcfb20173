//! Lifecycle notifications that plugins can listen to.

use std::fmt;

use crate::compilation::Stats;
use crate::config::Config;

type Listener<T> = Box<dyn Fn(&T)>;

/// Ordered, synchronous listener list for one lifecycle event.
pub struct SyncHook<T: ?Sized> {
    listeners: Vec<(String, Listener<T>)>,
}

impl<T: ?Sized> SyncHook<T> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register `listener` under `name`; listeners fire in registration order.
    pub fn tap<F>(&mut self, name: impl Into<String>, listener: F)
    where
        F: Fn(&T) + 'static,
    {
        self.listeners.push((name.into(), Box::new(listener)));
    }

    pub fn call(&self, arg: &T) {
        for (name, listener) in &self.listeners {
            tracing::trace!("calling listener {name}");
            listener(arg);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T: ?Sized> Default for SyncHook<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for SyncHook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.listeners.iter().map(|(name, _)| name))
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct CompilerHooks {
    /// Fired before any module is read.
    pub run: SyncHook<Config>,
    /// Fired after the assets were handed to the caller.
    pub done: SyncHook<Stats>,
}
