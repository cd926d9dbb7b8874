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

//! Namespace-to-factory dispatch.

use crate::context::ResolveContext;
use crate::descriptor::EndpointDescriptor;
use crate::destination::DestinationHandle;
use crate::error::ResolveError;
use crate::observability::{events, fields};
use crate::transport::TransportFactory;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

const COMPONENT: &str = "transport_factory_manager";

/// Routes descriptors to the transport factory registered for their transport id.
#[derive(Default)]
pub struct TransportFactoryManager {
    factories: RwLock<HashMap<String, Arc<dyn TransportFactory>>>,
}

impl TransportFactoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds every namespace the factory serves. A namespace already bound keeps its
    /// first factory; returns `true` only when every namespace was newly bound.
    pub async fn register(&self, factory: Arc<dyn TransportFactory>) -> bool {
        let mut factories = self.factories.write().await;
        let mut all_bound = true;

        for transport_id in factory.transport_ids() {
            if factories.contains_key(transport_id) {
                warn!(
                    event = events::TRANSPORT_FACTORY_SHADOWED,
                    component = COMPONENT,
                    transport_id = %transport_id,
                    "namespace already has a transport factory; keeping the first one"
                );
                all_bound = false;
                continue;
            }
            factories.insert(transport_id.clone(), factory.clone());
        }

        debug!(
            event = events::TRANSPORT_FACTORY_REGISTERED,
            component = COMPONENT,
            transport_ids = %fields::format_transport_ids(factory.transport_ids()),
            all_bound,
            "registered transport factory"
        );
        all_bound
    }

    pub async fn factory_for(&self, transport_id: &str) -> Option<Arc<dyn TransportFactory>> {
        self.factories.read().await.get(transport_id).cloned()
    }

    /// Registered namespaces in sorted order.
    pub async fn transport_ids(&self) -> Vec<String> {
        let mut transport_ids: Vec<String> = self.factories.read().await.keys().cloned().collect();
        transport_ids.sort();
        transport_ids
    }

    pub async fn get_destination(
        &self,
        descriptor: &EndpointDescriptor,
        context: &ResolveContext,
    ) -> Result<DestinationHandle, ResolveError> {
        descriptor.validate()?;

        let Some(factory) = self.factory_for(descriptor.transport_id()).await else {
            warn!(
                event = events::TRANSPORT_FACTORY_MISSING,
                component = COMPONENT,
                address = descriptor.address(),
                transport_id = descriptor.transport_id(),
                "no transport factory for descriptor"
            );
            return Err(ResolveError::Configuration(format!(
                "no transport factory registered for {}",
                descriptor.transport_id()
            )));
        };

        factory.get_destination(descriptor, context).await
    }
}
