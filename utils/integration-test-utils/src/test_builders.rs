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

use crate::RecordingDestination;
use async_trait::async_trait;
use endpoint_registrar::{BuildOutcome, DestinationBuilder, EndpointDescriptor, ResolveContext};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

/// Builder that counts invocations and keeps every destination it produced.
///
/// An optional delay keeps the build in flight long enough for concurrent callers
/// to pile up behind it.
#[derive(Default)]
pub struct CountingBuilder {
    delay: Option<Duration>,
    builds: AtomicUsize,
    built: Mutex<Vec<Arc<RecordingDestination>>>,
}

impl CountingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    /// Every destination produced so far, winners and race losers alike.
    pub fn built(&self) -> Vec<Arc<RecordingDestination>> {
        self.built
            .lock()
            .map(|built| built.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DestinationBuilder for CountingBuilder {
    async fn build(
        &self,
        descriptor: &EndpointDescriptor,
        _context: &ResolveContext,
    ) -> BuildOutcome {
        let count = self.builds.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(address = descriptor.address(), count, "test builder invoked");

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let destination = Arc::new(RecordingDestination::new(descriptor));
        if let Ok(mut built) = self.built.lock() {
            built.push(destination.clone());
        }
        BuildOutcome::Built(destination)
    }
}

/// Builder whose capability can be switched on and off between calls.
pub struct ToggleBuilder {
    capability: String,
    available: AtomicBool,
    attempts: AtomicUsize,
}

impl ToggleBuilder {
    pub fn new(capability: &str, available: bool) -> Self {
        Self {
            capability: capability.to_string(),
            available: AtomicBool::new(available),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DestinationBuilder for ToggleBuilder {
    async fn build(
        &self,
        descriptor: &EndpointDescriptor,
        _context: &ResolveContext,
    ) -> BuildOutcome {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.available.load(Ordering::SeqCst) {
            BuildOutcome::Built(Arc::new(RecordingDestination::new(descriptor)))
        } else {
            BuildOutcome::unavailable(&self.capability)
        }
    }
}
