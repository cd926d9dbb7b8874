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

//! Canonical structured event names used across `endpoint-registrar`.

// Registrar resolution events.
pub const RESOLVE_REJECTED: &str = "resolve_rejected";
pub const RESOLVE_REUSED: &str = "resolve_reused";
pub const RESOLVE_CREATED: &str = "resolve_created";
pub const RESOLVE_RACE_LOST: &str = "resolve_race_lost";
pub const BUILD_OK: &str = "destination_build_ok";
pub const BUILD_UNAVAILABLE: &str = "destination_build_unavailable";
pub const CONFIGURE_FAILED: &str = "destination_configure_failed";
pub const DESTINATION_SHUTDOWN: &str = "destination_shutdown";

// Registry table events.
pub const REGISTRY_INSERT: &str = "registry_insert";
pub const REGISTRY_REMOVE: &str = "registry_remove";
pub const REGISTRY_INVARIANT_VIOLATED: &str = "registry_invariant_violated";

// Transport factory events.
pub const TRANSPORT_FACTORY_REGISTERED: &str = "transport_factory_registered";
pub const TRANSPORT_FACTORY_SHADOWED: &str = "transport_factory_shadowed";
pub const TRANSPORT_FACTORY_MISSING: &str = "transport_factory_missing";

// SSE destination events.
pub const SSE_SUBSCRIBE: &str = "sse_subscribe";
pub const SSE_SUBSCRIBE_REJECTED: &str = "sse_subscribe_rejected";
pub const SSE_PUBLISH: &str = "sse_publish";
pub const SSE_PUBLISH_REJECTED: &str = "sse_publish_rejected";
pub const SSE_SHUTDOWN: &str = "sse_shutdown";
