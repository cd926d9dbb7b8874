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

mod support;

use endpoint_registrar::{
    downcast_destination, Destination, DestinationRegistry, EndpointDescriptor, HttpDestination,
    HttpTransportFactory, ResolveError, SseDestination, SseEvent, SseRuntime,
    SseTransportFactory, TransportFactory, TransportFactoryManager, HTTP_TRANSPORT_ID,
    SSE_RUNTIME_CAPABILITY, SSE_TRANSPORT_ID,
};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread")]
async fn sse_without_runtime_is_unavailable_until_one_is_provisioned() {
    integration_test_utils::init_logging();

    let registry = Arc::new(DestinationRegistry::new());
    let context = support::make_context("sse-provisioning");
    let descriptor = EndpointDescriptor::new("/svc/events", SSE_TRANSPORT_ID);

    let unprovisioned = SseTransportFactory::new(Some(registry.clone()), None);
    let err = unprovisioned
        .get_destination(&descriptor, &context)
        .await
        .err()
        .expect("no streaming runtime");
    assert_eq!(
        err,
        ResolveError::Unavailable {
            address: "/svc/events".to_string(),
            capability: SSE_RUNTIME_CAPABILITY.to_string(),
        }
    );
    assert!(registry.is_empty().await);

    let provisioned = SseTransportFactory::new(Some(registry.clone()), Some(SseRuntime::default()));
    let destination = provisioned
        .get_destination(&descriptor, &context)
        .await
        .expect("runtime is provisioned");

    assert!(destination.is_finalized());
    assert!(Arc::ptr_eq(unprovisioned.registry(), provisioned.registry()));

    let again = unprovisioned
        .get_destination(&descriptor, &context)
        .await
        .expect("registered destination is returned without building");
    assert!(Arc::ptr_eq(&destination, &again));
}

#[tokio::test(flavor = "multi_thread")]
async fn manager_dispatches_by_transport_over_one_registry() {
    integration_test_utils::init_logging();

    let registry = Arc::new(DestinationRegistry::new());
    let manager = TransportFactoryManager::new();
    assert!(
        manager
            .register(Arc::new(HttpTransportFactory::new(Some(registry.clone()))))
            .await
    );
    assert!(
        manager
            .register(Arc::new(SseTransportFactory::new(
                Some(registry.clone()),
                Some(SseRuntime::default()),
            )))
            .await
    );
    assert_eq!(manager.transport_ids().await.len(), 4);

    let context = support::make_context("dispatch");
    let http = manager
        .get_destination(&EndpointDescriptor::new("/svc/a", HTTP_TRANSPORT_ID), &context)
        .await
        .expect("http resolves");
    let sse = manager
        .get_destination(
            &EndpointDescriptor::new("/svc/events", SSE_TRANSPORT_ID),
            &context,
        )
        .await
        .expect("sse resolves");

    assert!(downcast_destination::<HttpDestination>(&http).is_some());
    assert!(downcast_destination::<SseDestination>(&sse).is_some());
    assert_eq!(
        registry.destination_paths().await,
        vec!["/svc/a", "/svc/events"]
    );

    let err = manager
        .get_destination(&EndpointDescriptor::new("/svc/a", "jms"), &context)
        .await
        .err()
        .expect("no factory serves jms");
    assert!(matches!(err, ResolveError::Configuration(ref message) if message.contains("jms")));
}

#[tokio::test(flavor = "multi_thread")]
async fn first_transport_to_claim_a_path_owns_it() {
    integration_test_utils::init_logging();

    let registry = Arc::new(DestinationRegistry::new());
    let http = HttpTransportFactory::new(Some(registry.clone()));
    let sse = SseTransportFactory::new(Some(registry.clone()), Some(SseRuntime::default()));
    let context = support::make_context("ownership");

    let owner = http
        .get_destination(&EndpointDescriptor::new("/svc/shared", HTTP_TRANSPORT_ID), &context)
        .await
        .expect("http claims the path");
    let through_sse = sse
        .get_destination(
            &EndpointDescriptor::new("http://localhost:8080/svc/shared", SSE_TRANSPORT_ID),
            &context,
        )
        .await
        .expect("sse sees the registered destination");

    assert!(Arc::ptr_eq(&owner, &through_sse));
    assert_eq!(through_sse.transport_id(), HTTP_TRANSPORT_ID);
    assert_eq!(registry.len().await, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn resolved_sse_destination_streams_events() {
    integration_test_utils::init_logging();

    let factory = SseTransportFactory::new(None, Some(SseRuntime::default()));
    let handle = factory
        .get_destination(
            &EndpointDescriptor::new("/svc/events", SSE_TRANSPORT_ID),
            &support::make_context("streaming"),
        )
        .await
        .expect("sse resolves");
    let destination =
        downcast_destination::<SseDestination>(&handle).expect("sse factory builds sse");

    let mut first = destination.subscribe().expect("first subscriber");
    let mut second = destination.subscribe().expect("second subscriber");

    let delivered = destination
        .publish(SseEvent::new("hello").with_event("greeting"))
        .expect("finalized destinations publish");
    assert_eq!(delivered, 2);

    for receiver in [&mut first, &mut second] {
        let event = receiver.recv().await.expect("event is delivered");
        assert_eq!(event.encode(), "event: greeting\ndata: hello\n\n");
    }

    assert!(factory.registrar().remove("/svc/events").await);
    assert!(destination.subscribe().is_err());
}
