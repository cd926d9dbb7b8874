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

//! Plain HTTP destinations and their transport factory.

use crate::builder::{BuildOutcome, DestinationBuilder};
use crate::context::ResolveContext;
use crate::control_plane::destination_registry::DestinationRegistry;
use crate::control_plane::registrar::{EndpointRegistrar, LockScope};
use crate::descriptor::EndpointDescriptor;
use crate::destination::{Destination, DestinationHandle};
use crate::error::ResolveError;
use crate::settings::SettingsCell;
use crate::transport::TransportFactory;
use async_trait::async_trait;
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

pub const HTTP_TRANSPORT_ID: &str = "http://registrar/transports/http";
pub const HTTP_CONFIGURATION_NAMESPACE: &str = "http://registrar/transports/http/configuration";

/// Request/response destination bound to a path on the shared HTTP listener.
pub struct HttpDestination {
    address: String,
    transport_id: String,
    instance_id: Uuid,
    settings: SettingsCell,
    active: AtomicBool,
}

impl HttpDestination {
    pub fn new(descriptor: &EndpointDescriptor) -> Self {
        Self {
            address: descriptor.address().to_string(),
            transport_id: descriptor.transport_id().to_string(),
            instance_id: Uuid::new_v4(),
            settings: SettingsCell::default(),
            active: AtomicBool::new(true),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl Destination for HttpDestination {
    fn address(&self) -> &str {
        &self.address
    }

    fn transport_id(&self) -> &str {
        &self.transport_id
    }

    fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    fn settings(&self) -> &SettingsCell {
        &self.settings
    }

    fn shutdown(&self) {
        self.active.store(false, Ordering::Release);
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Builds [`HttpDestination`]s. Has no optional dependencies.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpDestinationBuilder;

#[async_trait]
impl DestinationBuilder for HttpDestinationBuilder {
    async fn build(
        &self,
        descriptor: &EndpointDescriptor,
        _context: &ResolveContext,
    ) -> BuildOutcome {
        BuildOutcome::Built(Arc::new(HttpDestination::new(descriptor)))
    }
}

/// Transport factory for plain HTTP destinations.
pub struct HttpTransportFactory {
    transport_ids: Vec<String>,
    registrar: EndpointRegistrar,
}

impl HttpTransportFactory {
    /// Uses `registry` when given, otherwise a registry private to this factory.
    pub fn new(registry: Option<Arc<DestinationRegistry>>) -> Self {
        let registry = registry.unwrap_or_default();
        Self {
            transport_ids: vec![
                HTTP_TRANSPORT_ID.to_string(),
                HTTP_CONFIGURATION_NAMESPACE.to_string(),
            ],
            registrar: EndpointRegistrar::new(registry, Arc::new(HttpDestinationBuilder)),
        }
    }

    pub fn with_lock_scope(mut self, lock_scope: LockScope) -> Self {
        self.registrar = self.registrar.with_lock_scope(lock_scope);
        self
    }

    pub fn registrar(&self) -> &EndpointRegistrar {
        &self.registrar
    }
}

#[async_trait]
impl TransportFactory for HttpTransportFactory {
    fn transport_ids(&self) -> &[String] {
        &self.transport_ids
    }

    fn registry(&self) -> &Arc<DestinationRegistry> {
        self.registrar.registry()
    }

    async fn get_destination(
        &self,
        descriptor: &EndpointDescriptor,
        context: &ResolveContext,
    ) -> Result<DestinationHandle, ResolveError> {
        self.registrar.resolve(descriptor, context).await
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpDestination, HttpTransportFactory, HTTP_TRANSPORT_ID};
    use crate::context::ResolveContext;
    use crate::descriptor::EndpointDescriptor;
    use crate::destination::{downcast_destination, Destination};
    use crate::transport::TransportFactory;
    use std::sync::Arc;

    #[tokio::test]
    async fn private_registry_is_created_when_none_is_given() {
        let factory = HttpTransportFactory::new(None);
        let descriptor = EndpointDescriptor::new("/svc/a", HTTP_TRANSPORT_ID);

        let destination = factory
            .get_destination(&descriptor, &ResolveContext::new("test"))
            .await
            .expect("http destinations are always available");

        assert_eq!(factory.registry().len().await, 1);
        assert!(destination.is_finalized());
        let http = downcast_destination::<HttpDestination>(&destination)
            .expect("destination is an HttpDestination");
        assert!(http.is_active());
    }

    #[tokio::test]
    async fn shutdown_deactivates_destination() {
        let destination = Arc::new(HttpDestination::new(&EndpointDescriptor::new(
            "/svc/a",
            HTTP_TRANSPORT_ID,
        )));

        destination.shutdown();

        assert!(!destination.is_active());
    }
}
