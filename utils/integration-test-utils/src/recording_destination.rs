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

use endpoint_registrar::{Destination, EndpointDescriptor, SettingsCell};
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Destination that records how often it was shut down.
pub struct RecordingDestination {
    address: String,
    transport_id: String,
    instance_id: Uuid,
    settings: SettingsCell,
    shutdowns: AtomicUsize,
}

impl RecordingDestination {
    pub fn new(descriptor: &EndpointDescriptor) -> Self {
        Self {
            address: descriptor.address().to_string(),
            transport_id: descriptor.transport_id().to_string(),
            instance_id: Uuid::new_v4(),
            settings: SettingsCell::default(),
            shutdowns: AtomicUsize::new(0),
        }
    }

    pub fn shutdown_count(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

impl Destination for RecordingDestination {
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
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
