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

use crate::context::ResolveContext;
use crate::control_plane::destination_registry::DestinationRegistry;
use crate::control_plane::registrar::{EndpointRegistrar, LockScope};
use crate::descriptor::EndpointDescriptor;
use crate::destination::DestinationHandle;
use crate::error::ResolveError;
use crate::sse::destination::{SseDestinationBuilder, SseRuntime};
use crate::transport::TransportFactory;
use async_trait::async_trait;
use std::sync::Arc;

pub const SSE_TRANSPORT_ID: &str = "http://registrar/transports/http/sse";
pub const SSE_CONFIGURATION_NAMESPACE: &str =
    "http://registrar/transports/http/sse/configuration";

/// [`SseTransportFactory`] publishes SSE destinations into an HTTP destination registry.
///
/// Passing the registry used by an [`HttpTransportFactory`][crate::HttpTransportFactory]
/// places both transports in one address space: whichever resolves a path first owns it,
/// and the other gets the same destination back.
///
/// # Examples
///
/// ```
/// use endpoint_registrar::{
///     DestinationRegistry, EndpointDescriptor, ResolveContext, ResolveError, SseRuntime,
///     SseTransportFactory, TransportFactory, SSE_TRANSPORT_ID,
/// };
/// use std::sync::Arc;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let registry = Arc::new(DestinationRegistry::new());
/// let descriptor = EndpointDescriptor::new("/events", SSE_TRANSPORT_ID);
/// let context = ResolveContext::new("doc");
///
/// let without_runtime = SseTransportFactory::new(Some(registry.clone()), None);
/// assert!(matches!(
///     without_runtime.get_destination(&descriptor, &context).await,
///     Err(ResolveError::Unavailable { .. })
/// ));
///
/// let with_runtime = SseTransportFactory::new(Some(registry), Some(SseRuntime::default()));
/// assert!(with_runtime.get_destination(&descriptor, &context).await.is_ok());
/// # });
/// ```
pub struct SseTransportFactory {
    transport_ids: Vec<String>,
    registrar: EndpointRegistrar,
}

impl SseTransportFactory {
    /// Uses `registry` when given, otherwise a registry private to this factory.
    pub fn new(registry: Option<Arc<DestinationRegistry>>, runtime: Option<SseRuntime>) -> Self {
        let registry = registry.unwrap_or_default();
        Self {
            transport_ids: vec![
                SSE_TRANSPORT_ID.to_string(),
                SSE_CONFIGURATION_NAMESPACE.to_string(),
            ],
            registrar: EndpointRegistrar::new(
                registry,
                Arc::new(SseDestinationBuilder::new(runtime)),
            ),
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
impl TransportFactory for SseTransportFactory {
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
    use super::{SseTransportFactory, SSE_TRANSPORT_ID};
    use crate::context::ResolveContext;
    use crate::descriptor::EndpointDescriptor;
    use crate::destination::downcast_destination;
    use crate::error::ResolveError;
    use crate::settings::DestinationSettings;
    use crate::sse::destination::{SseDestination, SseRuntime, SSE_RUNTIME_CAPABILITY};
    use crate::sse::event::SseEvent;
    use crate::transport::TransportFactory;

    #[tokio::test]
    async fn missing_runtime_names_the_capability_and_registers_nothing() {
        let factory = SseTransportFactory::new(None, None);

        let result = factory
            .get_destination(
                &EndpointDescriptor::new("/events", SSE_TRANSPORT_ID),
                &ResolveContext::new("test"),
            )
            .await;

        assert_eq!(
            result.err(),
            Some(ResolveError::Unavailable {
                address: "/events".to_string(),
                capability: SSE_RUNTIME_CAPABILITY.to_string(),
            })
        );
        assert!(factory.registry().is_empty().await);
    }

    #[tokio::test]
    async fn resolved_destination_streams_with_context_settings() {
        let factory = SseTransportFactory::new(None, Some(SseRuntime::default()));
        let context = ResolveContext::new("test").with_override(
            "/events",
            DestinationSettings {
                max_subscribers: Some(1),
                ..Default::default()
            },
        );

        let handle = factory
            .get_destination(&EndpointDescriptor::new("/events", SSE_TRANSPORT_ID), &context)
            .await
            .expect("runtime is provisioned");
        let sse = downcast_destination::<SseDestination>(&handle).expect("sse destination");

        let mut receiver = sse.subscribe().expect("first subscriber");
        assert!(sse.subscribe().is_err());
        assert_eq!(sse.publish(SseEvent::new("tick")), Ok(1));
        assert_eq!(receiver.recv().await.expect("event").data, "tick");
    }
}
