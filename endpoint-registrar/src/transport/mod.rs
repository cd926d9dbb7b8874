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

//! Transport front-ends.
//!
//! A transport factory serves one or more transport namespaces and resolves
//! destinations through its own [`EndpointRegistrar`][crate::EndpointRegistrar]. Several
//! factories may share one [`DestinationRegistry`], in which case an address published
//! through one of them is returned, unchanged, through the others.

use crate::context::ResolveContext;
use crate::control_plane::destination_registry::DestinationRegistry;
use crate::descriptor::EndpointDescriptor;
use crate::destination::DestinationHandle;
use crate::error::ResolveError;
use async_trait::async_trait;
use std::sync::Arc;

pub(crate) mod http;
pub(crate) mod manager;

/// Front-end resolving destinations for the transport namespaces it serves.
#[async_trait]
pub trait TransportFactory: Send + Sync {
    /// Namespaces this factory answers for.
    fn transport_ids(&self) -> &[String];

    fn registry(&self) -> &Arc<DestinationRegistry>;

    async fn get_destination(
        &self,
        descriptor: &EndpointDescriptor,
        context: &ResolveContext,
    ) -> Result<DestinationHandle, ResolveError>;
}
