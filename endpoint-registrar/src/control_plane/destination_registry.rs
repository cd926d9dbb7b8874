/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Shared path-to-destination table and its locking discipline.

use crate::control_plane::address_key::AddressKey;
use crate::destination::DestinationHandle;
use crate::error::ResolveError;
use crate::observability::events;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error};

const COMPONENT: &str = "destination_registry";

/// Locked view of the registry table, held for the duration of one critical section.
pub(crate) struct DestinationTable<'a> {
    destinations: MutexGuard<'a, HashMap<AddressKey, DestinationHandle>>,
}

impl DestinationTable<'_> {
    pub(crate) fn get(&self, key: &AddressKey) -> Option<DestinationHandle> {
        self.destinations.get(key).cloned()
    }

    /// Inserts into a vacant slot. An occupied slot means two destinations were built
    /// for one address and is reported, never overwritten.
    pub(crate) fn insert(
        &mut self,
        key: AddressKey,
        destination: DestinationHandle,
    ) -> Result<(), ResolveError> {
        if self.destinations.contains_key(&key) {
            error!(
                event = events::REGISTRY_INVARIANT_VIOLATED,
                component = COMPONENT,
                address = %key,
                instance_id = %destination.instance_id(),
                "refusing to register a second destination for an occupied address"
            );
            return Err(ResolveError::DuplicateDestination {
                address: key.to_string(),
            });
        }

        debug!(
            event = events::REGISTRY_INSERT,
            component = COMPONENT,
            address = %key,
            transport_id = destination.transport_id(),
            instance_id = %destination.instance_id(),
            "registered destination"
        );
        self.destinations.insert(key, destination);
        Ok(())
    }

    pub(crate) fn remove(&mut self, key: &AddressKey) -> Option<DestinationHandle> {
        let removed = self.destinations.remove(key);
        debug!(
            event = events::REGISTRY_REMOVE,
            component = COMPONENT,
            address = %key,
            removed = removed.is_some(),
            "removed destination"
        );
        removed
    }
}

/// Registry of live destinations keyed by normalized address path.
///
/// One registry may be shared by several transport factories; all of them then publish
/// into the same physical address space and observe each other's destinations.
///
/// ```
/// use endpoint_registrar::DestinationRegistry;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let registry = DestinationRegistry::new();
/// assert!(registry.is_empty().await);
/// assert!(registry.destination_for_path("/svc/a").await.is_none());
/// # });
/// ```
pub struct DestinationRegistry {
    destinations: Mutex<HashMap<AddressKey, DestinationHandle>>,
    lock_acquisitions: AtomicU64,
}

impl Default for DestinationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DestinationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            destinations: Mutex::new(HashMap::new()),
            lock_acquisitions: AtomicU64::new(0),
        }
    }

    /// Enters the registry critical section.
    pub(crate) async fn lock(&self) -> DestinationTable<'_> {
        self.lock_acquisitions.fetch_add(1, Ordering::Relaxed);
        DestinationTable {
            destinations: self.destinations.lock().await,
        }
    }

    /// Number of times the registry table has been locked.
    pub(crate) fn lock_acquisitions(&self) -> u64 {
        self.lock_acquisitions.load(Ordering::Relaxed)
    }

    /// Destination registered for the path of `address`, if any.
    pub async fn destination_for_path(&self, address: &str) -> Option<DestinationHandle> {
        let key = AddressKey::parse(address).ok()?;
        self.lock().await.get(&key)
    }

    /// Registers an externally built destination under its own address.
    pub async fn add_destination(&self, destination: DestinationHandle) -> Result<(), ResolveError> {
        let key = AddressKey::parse(destination.address())?;
        self.lock().await.insert(key, destination)
    }

    /// Removes the destination for the path of `address`. The caller owns its shutdown.
    pub async fn remove_destination(&self, address: &str) -> Option<DestinationHandle> {
        let key = AddressKey::parse(address).ok()?;
        self.lock().await.remove(&key)
    }

    /// Registered paths in sorted order.
    pub async fn destination_paths(&self) -> Vec<String> {
        let table = self.lock().await;
        let mut paths: Vec<String> = table
            .destinations
            .keys()
            .map(ToString::to_string)
            .collect();
        paths.sort();
        paths
    }

    pub async fn destinations(&self) -> Vec<DestinationHandle> {
        self.lock().await.destinations.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.lock().await.destinations.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.lock().await.destinations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::DestinationRegistry;
    use crate::destination::{Destination, DestinationHandle};
    use crate::error::ResolveError;
    use crate::settings::SettingsCell;
    use std::any::Any;
    use std::sync::Arc;
    use uuid::Uuid;

    struct StaticDestination {
        address: String,
        instance_id: Uuid,
        settings: SettingsCell,
    }

    impl StaticDestination {
        fn handle(address: &str) -> DestinationHandle {
            Arc::new(Self {
                address: address.to_string(),
                instance_id: Uuid::new_v4(),
                settings: SettingsCell::default(),
            })
        }
    }

    impl Destination for StaticDestination {
        fn address(&self) -> &str {
            &self.address
        }

        fn transport_id(&self) -> &str {
            "static"
        }

        fn instance_id(&self) -> Uuid {
            self.instance_id
        }

        fn settings(&self) -> &SettingsCell {
            &self.settings
        }

        fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
            self
        }
    }

    #[tokio::test]
    async fn add_destination_refuses_occupied_path() {
        let registry = DestinationRegistry::new();

        registry
            .add_destination(StaticDestination::handle("/svc/a"))
            .await
            .expect("first registration succeeds");
        let err = registry
            .add_destination(StaticDestination::handle("http://host:1/svc/a"))
            .await
            .expect_err("second registration for the same path fails");

        assert_eq!(
            err,
            ResolveError::DuplicateDestination {
                address: "/svc/a".to_string()
            }
        );
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn lookup_and_remove_use_normalized_paths() {
        let registry = DestinationRegistry::new();
        let destination = StaticDestination::handle("/svc/a");
        registry
            .add_destination(destination.clone())
            .await
            .expect("registration succeeds");

        let found = registry
            .destination_for_path("https://elsewhere/svc/a/?x=1")
            .await
            .expect("normalized lookup hits");
        assert!(Arc::ptr_eq(&found, &destination));
        assert_eq!(registry.destination_paths().await, vec!["/svc/a"]);

        assert!(registry.remove_destination("/svc/a").await.is_some());
        assert!(registry.remove_destination("/svc/a").await.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn lock_acquisitions_count_every_access() {
        let registry = DestinationRegistry::new();
        assert_eq!(registry.lock_acquisitions(), 0);

        let _ = registry.destination_for_path("/svc/a").await;
        let _ = registry.destination_for_path("").await;

        assert_eq!(registry.lock_acquisitions(), 1);
    }
}
