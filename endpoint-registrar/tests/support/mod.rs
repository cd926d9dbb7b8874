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

use endpoint_registrar::{
    DestinationBuilder, DestinationRegistry, DestinationSettings, EndpointRegistrar, LockScope,
    ResolveContext,
};
use std::sync::Arc;

#[allow(dead_code)]
pub(crate) fn make_registrar(
    builder: Arc<dyn DestinationBuilder>,
    lock_scope: LockScope,
) -> EndpointRegistrar {
    EndpointRegistrar::new(Arc::new(DestinationRegistry::new()), builder)
        .with_lock_scope(lock_scope)
}

#[allow(dead_code)]
pub(crate) fn make_context(name: &str) -> ResolveContext {
    ResolveContext::new(name).with_defaults(DestinationSettings {
        keep_alive_ms: Some(15_000),
        max_subscribers: Some(16),
        ..Default::default()
    })
}

#[allow(dead_code)]
pub(crate) const LOCK_SCOPES: [LockScope; 2] = [LockScope::Registry, LockScope::Insert];
