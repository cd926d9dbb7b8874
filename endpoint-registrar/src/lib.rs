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

//! # endpoint-registrar
//!
//! `endpoint-registrar` publishes network-facing destinations exactly once per address.
//!
//! Callers describe the endpoint they need with an [`EndpointDescriptor`] and ask an
//! [`EndpointRegistrar`] to resolve it. The registrar looks the address up in a shared
//! [`DestinationRegistry`]; on a miss it asks its [`DestinationBuilder`] for a new
//! destination, registers it, lets a [`DestinationConfigurer`] apply context-scoped
//! settings and finalizes it before handing it out. Later resolutions of the same
//! address, from any task, get the same [`DestinationHandle`] back.
//!
//! ```
//! use endpoint_registrar::{
//!     Destination, DestinationRegistry, EndpointDescriptor, HttpTransportFactory, ResolveContext,
//!     SseRuntime, SseTransportFactory, TransportFactoryManager, HTTP_TRANSPORT_ID,
//!     SSE_TRANSPORT_ID,
//! };
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let registry = Arc::new(DestinationRegistry::new());
//! let manager = TransportFactoryManager::new();
//! manager
//!     .register(Arc::new(HttpTransportFactory::new(Some(registry.clone()))))
//!     .await;
//! manager
//!     .register(Arc::new(SseTransportFactory::new(
//!         Some(registry.clone()),
//!         Some(SseRuntime::default()),
//!     )))
//!     .await;
//!
//! let context = ResolveContext::new("quick-start");
//! let rest = manager
//!     .get_destination(&EndpointDescriptor::new("/svc/a", HTTP_TRANSPORT_ID), &context)
//!     .await
//!     .unwrap();
//! let events = manager
//!     .get_destination(&EndpointDescriptor::new("/svc/events", SSE_TRANSPORT_ID), &context)
//!     .await
//!     .unwrap();
//!
//! assert_ne!(rest.instance_id(), events.instance_id());
//! assert_eq!(registry.destination_paths().await, vec!["/svc/a", "/svc/events"]);
//! # });
//! ```
//!
//! ## Lock scope
//!
//! By default the whole lookup-build-register-finalize sequence runs inside the registry
//! critical section ([`LockScope::Registry`]). Builders that may be slow can opt into
//! [`LockScope::Insert`], which builds outside the lock and re-checks the registry before
//! inserting; the loser of a race shuts its destination down and returns the winner.
//!
//! ## Internal architecture map
//!
//! - Control plane: registry table, address identity and the registrar
//! - Transport: factory trait, namespace dispatch and plain HTTP destinations
//! - SSE: event encoding, broadcast destination and its runtime-gated factory
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events.
//! Library code emits events and does not initialize a global subscriber. Binaries and
//! tests are responsible for one-time `tracing_subscriber` initialization.

mod builder;
pub use builder::{BuildOutcome, DestinationBuilder};

mod configurer;
pub use configurer::{ContextConfigurer, DestinationConfigurer};

mod context;
pub use context::ResolveContext;

mod control_plane;
pub use control_plane::destination_registry::DestinationRegistry;
pub use control_plane::registrar::{EndpointRegistrar, LockScope};

mod descriptor;
pub use descriptor::EndpointDescriptor;

mod destination;
pub use destination::{downcast_destination, Destination, DestinationHandle};

mod error;
pub use error::{ResolveError, SettingsError};

#[doc(hidden)]
pub mod observability;

mod settings;
pub use settings::{DestinationSettings, SettingsCell};

mod sse;
pub use sse::destination::{
    SseDestination, SseDestinationBuilder, SseError, SseRuntime, SSE_RUNTIME_CAPABILITY,
};
pub use sse::event::SseEvent;
pub use sse::factory::{SseTransportFactory, SSE_CONFIGURATION_NAMESPACE, SSE_TRANSPORT_ID};

mod transport;
pub use transport::http::{
    HttpDestination, HttpDestinationBuilder, HttpTransportFactory, HTTP_CONFIGURATION_NAMESPACE,
    HTTP_TRANSPORT_ID,
};
pub use transport::manager::TransportFactoryManager;
pub use transport::TransportFactory;
