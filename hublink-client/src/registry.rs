//! Hub registry
//!
//! Maps logical identifiers to hub bindings and memoizes one façade per
//! binding: the first `resolve` for an identifier creates the hub through
//! the factory, every later `resolve` returns the identical `Arc`. The
//! caller controls the lifecycle — `release` evicts a cached façade so
//! the next resolution starts fresh.

use crate::factory::HubFactory;
use crate::proxy::Hub;
use hublink_core::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Identifier-keyed cache of hub façades
pub struct HubRegistry {
    factory: HubFactory,
    bindings: Mutex<HashMap<String, String>>,
    hubs: Mutex<HashMap<String, Arc<Hub>>>,
}

impl HubRegistry {
    /// Create a registry backed by `factory`
    pub fn new(factory: HubFactory) -> Self {
        Self {
            factory,
            bindings: Mutex::new(HashMap::new()),
            hubs: Mutex::new(HashMap::new()),
        }
    }

    /// Declare that `identifier` resolves to the hub named `hub_name`
    ///
    /// Rebinding an identifier replaces the binding; an already cached
    /// façade for it stays cached until released.
    pub fn bind(&self, identifier: impl Into<String>, hub_name: impl Into<String>) {
        lock(&self.bindings).insert(identifier.into(), hub_name.into());
    }

    /// Resolve `identifier` to its façade, creating it on first use
    ///
    /// Every resolution of the same identifier returns the identical
    /// `Arc`. Resolving an identifier with no binding is an error.
    pub fn resolve(&self, identifier: &str) -> Result<Arc<Hub>> {
        let mut hubs = lock(&self.hubs);
        if let Some(hub) = hubs.get(identifier) {
            return Ok(Arc::clone(hub));
        }

        let hub_name = lock(&self.bindings)
            .get(identifier)
            .cloned()
            .ok_or_else(|| Error::UnboundHub(identifier.to_string()))?;

        tracing::debug!(identifier, hub_name = %hub_name, "creating hub for binding");
        let hub = Arc::new(self.factory.create_hub(&hub_name)?);
        hubs.insert(identifier.to_string(), Arc::clone(&hub));
        Ok(hub)
    }

    /// Evict the cached façade for `identifier`, returning it if present
    ///
    /// The binding itself remains; the next `resolve` creates a fresh hub.
    pub fn release(&self, identifier: &str) -> Option<Arc<Hub>> {
        lock(&self.hubs).remove(identifier)
    }

    /// The factory backing this registry
    pub fn factory(&self) -> &HubFactory {
        &self.factory
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
