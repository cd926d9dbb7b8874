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

use crate::control_plane::address_key::AddressKey;
use crate::error::ResolveError;
use crate::settings::DestinationSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Context shared by every resolution performed on behalf of one runtime.
///
/// `defaults` apply to every destination; `overrides` are keyed by address and are
/// matched after normalization, so `http://host:9000/svc/a` and `/svc/a` select the
/// same override.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResolveContext {
    pub name: String,
    #[serde(default)]
    pub defaults: DestinationSettings,
    #[serde(default)]
    pub overrides: HashMap<String, DestinationSettings>,
}

impl ResolveContext {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_defaults(mut self, defaults: DestinationSettings) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_override(mut self, address: &str, settings: DestinationSettings) -> Self {
        self.overrides.insert(address.to_string(), settings);
        self
    }

    /// Rejects override keys that are not usable addresses or that select the same
    /// normalized address as another key.
    pub fn validate(&self) -> Result<(), ResolveError> {
        let mut addresses: Vec<&String> = self.overrides.keys().collect();
        addresses.sort();

        let mut seen: HashMap<AddressKey, &str> = HashMap::new();
        for address in addresses {
            let key = AddressKey::parse(address)?;
            if let Some(previous) = seen.insert(key.clone(), address) {
                return Err(ResolveError::Configuration(format!(
                    "context {} has overrides {previous} and {address} for the same address {key}",
                    self.name
                )));
            }
        }
        Ok(())
    }

    /// Override registered for the given normalized address, if any.
    pub(crate) fn override_for(&self, key: &AddressKey) -> Option<&DestinationSettings> {
        self.overrides.iter().find_map(|(address, settings)| {
            AddressKey::parse(address)
                .ok()
                .filter(|candidate| candidate == key)
                .map(|_| settings)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ResolveContext;
    use crate::control_plane::address_key::AddressKey;
    use crate::error::ResolveError;
    use crate::settings::DestinationSettings;

    #[test]
    fn override_lookup_normalizes_configured_addresses() {
        let context = ResolveContext::new("ctx").with_override(
            "http://localhost:9000/svc/a/",
            DestinationSettings {
                max_subscribers: Some(3),
                ..Default::default()
            },
        );
        let key = AddressKey::parse("/svc/a").expect("valid address");

        assert_eq!(
            context.override_for(&key).and_then(|s| s.max_subscribers),
            Some(3)
        );
        assert!(context
            .override_for(&AddressKey::parse("/svc/b").expect("valid address"))
            .is_none());
    }

    #[test]
    fn overrides_selecting_one_address_are_rejected() {
        let context = ResolveContext::new("ctx")
            .with_override("/svc/a", DestinationSettings::default())
            .with_override("http://h:9000/svc/a/", DestinationSettings::default());

        let err = context.validate().expect_err("colliding overrides");

        assert!(matches!(&err, ResolveError::Configuration(reason) if reason.contains("/svc/a")));
        assert!(ResolveContext::new("ctx")
            .with_override("/svc/a", DestinationSettings::default())
            .with_override("/svc/b", DestinationSettings::default())
            .validate()
            .is_ok());
    }

    #[test]
    fn unusable_override_address_is_rejected() {
        let context =
            ResolveContext::new("ctx").with_override("http://", DestinationSettings::default());

        assert!(context.validate().is_err());
    }
}
