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

//! Exactly-once destination publication per address.

use crate::builder::{BuildOutcome, DestinationBuilder};
use crate::configurer::{ContextConfigurer, DestinationConfigurer};
use crate::context::ResolveContext;
use crate::control_plane::address_key::AddressKey;
use crate::control_plane::destination_registry::{DestinationRegistry, DestinationTable};
use crate::descriptor::EndpointDescriptor;
use crate::destination::DestinationHandle;
use crate::error::ResolveError;
use crate::observability::{events, fields};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

const COMPONENT: &str = "endpoint_registrar";

/// How much of a resolution runs inside the registry critical section.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockScope {
    /// Lookup, build, insert and finalize all run under one lock acquisition.
    /// Concurrent resolutions on the registry are serialized behind the builder.
    #[default]
    Registry,
    /// The builder runs outside the lock; the registry is re-checked before insert and
    /// a destination built by a losing caller is shut down.
    Insert,
}

/// Resolves endpoint descriptors to destinations, creating each one at most once per
/// address in the shared [`DestinationRegistry`].
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use endpoint_registrar::{
///     BuildOutcome, Destination, DestinationBuilder, DestinationRegistry, EndpointDescriptor,
///     EndpointRegistrar, HttpDestination, ResolveContext,
/// };
/// use std::sync::Arc;
///
/// struct Builder;
///
/// #[async_trait]
/// impl DestinationBuilder for Builder {
///     async fn build(
///         &self,
///         descriptor: &EndpointDescriptor,
///         _context: &ResolveContext,
///     ) -> BuildOutcome {
///         BuildOutcome::Built(Arc::new(HttpDestination::new(descriptor)))
///     }
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let registry = Arc::new(DestinationRegistry::new());
/// let registrar = EndpointRegistrar::new(registry, Arc::new(Builder));
/// let context = ResolveContext::new("doc");
/// let descriptor = EndpointDescriptor::new("/svc/a", "http");
///
/// let first = registrar.resolve(&descriptor, &context).await.unwrap();
/// let second = registrar.resolve(&descriptor, &context).await.unwrap();
///
/// assert!(Arc::ptr_eq(&first, &second));
/// assert!(first.is_finalized());
/// # });
/// ```
pub struct EndpointRegistrar {
    registry: Arc<DestinationRegistry>,
    builder: Arc<dyn DestinationBuilder>,
    configurer: Arc<dyn DestinationConfigurer>,
    lock_scope: LockScope,
}

impl EndpointRegistrar {
    /// Creates a registrar using [`ContextConfigurer`] and [`LockScope::Registry`].
    pub fn new(registry: Arc<DestinationRegistry>, builder: Arc<dyn DestinationBuilder>) -> Self {
        Self {
            registry,
            builder,
            configurer: Arc::new(ContextConfigurer),
            lock_scope: LockScope::default(),
        }
    }

    pub fn with_configurer(mut self, configurer: Arc<dyn DestinationConfigurer>) -> Self {
        self.configurer = configurer;
        self
    }

    pub fn with_lock_scope(mut self, lock_scope: LockScope) -> Self {
        self.lock_scope = lock_scope;
        self
    }

    pub fn registry(&self) -> &Arc<DestinationRegistry> {
        &self.registry
    }

    pub fn lock_scope(&self) -> LockScope {
        self.lock_scope
    }

    /// Returns the destination registered for the descriptor's address, building,
    /// registering, configuring and finalizing it on first request.
    ///
    /// Invalid descriptors and contexts with colliding overrides fail before the registry
    /// is touched. A builder reporting a missing capability fails with
    /// [`ResolveError::Unavailable`] and leaves nothing behind, so a later call may succeed.
    pub async fn resolve(
        &self,
        descriptor: &EndpointDescriptor,
        context: &ResolveContext,
    ) -> Result<DestinationHandle, ResolveError> {
        let key = match descriptor
            .validate()
            .and_then(|_| context.validate())
            .and_then(|_| AddressKey::parse(descriptor.address()))
        {
            Ok(key) => key,
            Err(err) => {
                warn!(
                    event = events::RESOLVE_REJECTED,
                    component = COMPONENT,
                    address = descriptor.address(),
                    transport_id = descriptor.transport_id(),
                    err = %err,
                    "rejecting endpoint descriptor"
                );
                return Err(err);
            }
        };

        match self.lock_scope {
            LockScope::Registry => self.resolve_in_registry_scope(key, descriptor, context).await,
            LockScope::Insert => self.resolve_in_insert_scope(key, descriptor, context).await,
        }
    }

    async fn resolve_in_registry_scope(
        &self,
        key: AddressKey,
        descriptor: &EndpointDescriptor,
        context: &ResolveContext,
    ) -> Result<DestinationHandle, ResolveError> {
        let mut table = self.registry.lock().await;
        if let Some(existing) = table.get(&key) {
            self.log_reused(&key, &existing);
            return Ok(existing);
        }

        let destination = self.build(&key, descriptor, context).await?;
        self.publish(&mut table, key, destination, descriptor, context)
    }

    async fn resolve_in_insert_scope(
        &self,
        key: AddressKey,
        descriptor: &EndpointDescriptor,
        context: &ResolveContext,
    ) -> Result<DestinationHandle, ResolveError> {
        if let Some(existing) = self.registry.lock().await.get(&key) {
            self.log_reused(&key, &existing);
            return Ok(existing);
        }

        let destination = self.build(&key, descriptor, context).await?;

        let mut table = self.registry.lock().await;
        if let Some(existing) = table.get(&key) {
            debug!(
                event = events::RESOLVE_RACE_LOST,
                component = COMPONENT,
                address = %key,
                discarded_instance_id = %destination.instance_id(),
                instance_id = %existing.instance_id(),
                "another caller registered the address first"
            );
            drop(table);
            destination.shutdown();
            return Ok(existing);
        }

        self.publish(&mut table, key, destination, descriptor, context)
    }

    async fn build(
        &self,
        key: &AddressKey,
        descriptor: &EndpointDescriptor,
        context: &ResolveContext,
    ) -> Result<DestinationHandle, ResolveError> {
        match self.builder.build(descriptor, context).await {
            BuildOutcome::Built(destination) => {
                debug!(
                    event = events::BUILD_OK,
                    component = COMPONENT,
                    address = %key,
                    transport_id = destination.transport_id(),
                    instance_id = %destination.instance_id(),
                    "built destination"
                );
                Ok(destination)
            }
            BuildOutcome::Unavailable { capability } => {
                warn!(
                    event = events::BUILD_UNAVAILABLE,
                    component = COMPONENT,
                    address = %key,
                    transport_id = descriptor.transport_id(),
                    capability = %capability,
                    "no destination available"
                );
                Err(ResolveError::Unavailable {
                    address: key.to_string(),
                    capability,
                })
            }
        }
    }

    /// Inserts, configures and finalizes within the caller's critical section.
    fn publish(
        &self,
        table: &mut DestinationTable<'_>,
        key: AddressKey,
        destination: DestinationHandle,
        descriptor: &EndpointDescriptor,
        context: &ResolveContext,
    ) -> Result<DestinationHandle, ResolveError> {
        if let Err(err) = table.insert(key.clone(), destination.clone()) {
            destination.shutdown();
            return Err(err);
        }

        if let Err(err) = self
            .configurer
            .configure(destination.as_ref(), descriptor, context)
        {
            warn!(
                event = events::CONFIGURE_FAILED,
                component = COMPONENT,
                address = %key,
                instance_id = %destination.instance_id(),
                context = %context.name,
                err = %err,
                reason = "rollback_after_configure_failure",
                "unable to configure destination"
            );
            table.remove(&key);
            destination.shutdown();
            return Err(ResolveError::Configure {
                address: key.to_string(),
                source: err,
            });
        }

        destination.finalize_config();
        debug!(
            event = events::RESOLVE_CREATED,
            component = COMPONENT,
            address = %key,
            transport_id = destination.transport_id(),
            instance_id = %destination.instance_id(),
            lock_scope = fields::lock_scope_label(self.lock_scope),
            context = %context.name,
            "destination published"
        );
        Ok(destination)
    }

    fn log_reused(&self, key: &AddressKey, existing: &DestinationHandle) {
        debug!(
            event = events::RESOLVE_REUSED,
            component = COMPONENT,
            address = %key,
            instance_id = %existing.instance_id(),
            "returning registered destination"
        );
    }

    /// Removes and shuts down the destination for `address`. Returns whether one existed.
    pub async fn remove(&self, address: &str) -> bool {
        let Ok(key) = AddressKey::parse(address) else {
            return false;
        };

        let removed = self.registry.lock().await.remove(&key);
        match removed {
            Some(destination) => {
                destination.shutdown();
                debug!(
                    event = events::DESTINATION_SHUTDOWN,
                    component = COMPONENT,
                    address = %key,
                    instance_id = %destination.instance_id(),
                    "destination removed and shut down"
                );
                true
            }
            None => false,
        }
    }
}
