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
use crate::descriptor::EndpointDescriptor;
use crate::destination::DestinationHandle;
use async_trait::async_trait;

/// Result of one builder invocation.
pub enum BuildOutcome {
    Built(DestinationHandle),
    /// An optional capability the builder depends on is not provisioned.
    Unavailable { capability: String },
}

impl BuildOutcome {
    pub fn unavailable(capability: &str) -> Self {
        BuildOutcome::Unavailable {
            capability: capability.to_string(),
        }
    }
}

/// Pluggable construction of destinations for one transport.
///
/// Builders create a local handle only; they are not expected to perform remote
/// handshakes. A builder that may block for long should be paired with
/// [`LockScope::Insert`][crate::LockScope::Insert].
#[async_trait]
pub trait DestinationBuilder: Send + Sync {
    async fn build(&self, descriptor: &EndpointDescriptor, context: &ResolveContext)
        -> BuildOutcome;
}
