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
use crate::control_plane::address_key::AddressKey;
use crate::descriptor::EndpointDescriptor;
use crate::destination::Destination;
use crate::error::SettingsError;
use crate::settings::DestinationSettings;

/// Applies context-scoped configuration to a registered destination before it is
/// finalized and exposed to traffic.
pub trait DestinationConfigurer: Send + Sync {
    fn configure(
        &self,
        destination: &dyn Destination,
        descriptor: &EndpointDescriptor,
        context: &ResolveContext,
    ) -> Result<(), SettingsError>;
}

/// Layers descriptor metadata, context defaults and the per-address override, in that
/// order, and applies the result in one step.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContextConfigurer;

impl ContextConfigurer {
    pub fn effective_settings(
        descriptor: &EndpointDescriptor,
        context: &ResolveContext,
    ) -> DestinationSettings {
        let mut settings = DestinationSettings {
            properties: descriptor.metadata().clone(),
            ..Default::default()
        };
        settings.merge(&context.defaults);

        if let Some(overrides) = AddressKey::parse(descriptor.address())
            .ok()
            .and_then(|key| context.override_for(&key))
        {
            settings.merge(overrides);
        }
        settings
    }
}

impl DestinationConfigurer for ContextConfigurer {
    fn configure(
        &self,
        destination: &dyn Destination,
        descriptor: &EndpointDescriptor,
        context: &ResolveContext,
    ) -> Result<(), SettingsError> {
        destination.apply_settings(&Self::effective_settings(descriptor, context))
    }
}
