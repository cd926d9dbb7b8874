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

use crate::error::SettingsError;
use crate::settings::{DestinationSettings, SettingsCell};
use std::any::Any;
use std::sync::Arc;
use uuid::Uuid;

/// A live, network-addressable endpoint handle.
///
/// Destinations are created by a [`DestinationBuilder`][crate::DestinationBuilder],
/// owned by a [`DestinationRegistry`][crate::DestinationRegistry] once registered and
/// handed to callers as shared [`DestinationHandle`]s. Settings may be applied until
/// [`finalize_config`][Destination::finalize_config] runs; from then on the effective
/// configuration is fixed and the destination is safe for concurrent traffic.
pub trait Destination: Send + Sync + 'static {
    /// Address as requested by the descriptor that created this destination.
    fn address(&self) -> &str;

    fn transport_id(&self) -> &str;

    /// Identity of this instance, stable for its lifetime.
    fn instance_id(&self) -> Uuid;

    /// Pending and finalized configuration of this destination.
    fn settings(&self) -> &SettingsCell;

    fn apply_settings(&self, settings: &DestinationSettings) -> Result<(), SettingsError> {
        self.settings().apply(settings)
    }

    fn finalize_config(&self) {
        self.settings().finalize();
    }

    fn is_finalized(&self) -> bool {
        self.settings().is_finalized()
    }

    /// Finalized settings, `None` while configuration is still pending.
    fn effective_settings(&self) -> Option<DestinationSettings> {
        self.settings().effective().cloned()
    }

    /// Releases whatever the destination holds. Called when it leaves the registry
    /// or loses a registration race.
    fn shutdown(&self) {}

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

pub type DestinationHandle = Arc<dyn Destination>;

/// Recovers the concrete destination type behind a handle.
pub fn downcast_destination<T: Destination>(destination: &DestinationHandle) -> Option<Arc<T>> {
    destination.clone().into_any().downcast::<T>().ok()
}
