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

//! Destination settings and their pending/finalized lifecycle.

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Configuration carried by a destination.
///
/// Layers are combined with [`DestinationSettings::merge`]; the later layer wins for
/// scalar values and extends the property map.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct DestinationSettings {
    pub keep_alive_ms: Option<u64>,
    pub max_subscribers: Option<usize>,
    pub properties: BTreeMap<String, String>,
}

impl DestinationSettings {
    pub fn merge(&mut self, other: &DestinationSettings) {
        if other.keep_alive_ms.is_some() {
            self.keep_alive_ms = other.keep_alive_ms;
        }
        if other.max_subscribers.is_some() {
            self.max_subscribers = other.max_subscribers;
        }
        self.properties.extend(
            other
                .properties
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.keep_alive_ms == Some(0) {
            return Err(SettingsError::Invalid {
                key: "keep_alive_ms".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.max_subscribers == Some(0) {
            return Err(SettingsError::Invalid {
                key: "max_subscribers".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Holds pending settings until `finalize`, then exposes a frozen copy.
///
/// Destination implementations embed one of these to satisfy the
/// [`Destination`][crate::Destination] configuration contract.
#[derive(Debug, Default)]
pub struct SettingsCell {
    pending: Mutex<DestinationSettings>,
    effective: OnceLock<DestinationSettings>,
}

impl SettingsCell {
    pub fn new(initial: DestinationSettings) -> Self {
        Self {
            pending: Mutex::new(initial),
            effective: OnceLock::new(),
        }
    }

    fn lock_pending(&self) -> MutexGuard<'_, DestinationSettings> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn apply(&self, settings: &DestinationSettings) -> Result<(), SettingsError> {
        settings.validate()?;

        let mut pending = self.lock_pending();
        // finalize holds the same lock, so this check cannot race it
        if self.effective.get().is_some() {
            return Err(SettingsError::Locked);
        }
        pending.merge(settings);
        Ok(())
    }

    /// Freezes the pending settings. Calling it again returns the first snapshot.
    pub fn finalize(&self) -> &DestinationSettings {
        let pending = self.lock_pending();
        self.effective.get_or_init(|| pending.clone())
    }

    pub fn effective(&self) -> Option<&DestinationSettings> {
        self.effective.get()
    }

    pub fn is_finalized(&self) -> bool {
        self.effective.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{DestinationSettings, SettingsCell};
    use crate::error::SettingsError;

    fn settings(keep_alive_ms: Option<u64>, properties: &[(&str, &str)]) -> DestinationSettings {
        DestinationSettings {
            keep_alive_ms,
            max_subscribers: None,
            properties: properties
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    #[test]
    fn merge_prefers_later_layer_and_keeps_unset_values() {
        let mut base = settings(Some(1_000), &[("a", "1"), ("b", "1")]);
        base.max_subscribers = Some(4);

        base.merge(&settings(None, &[("b", "2"), ("c", "3")]));

        assert_eq!(base.keep_alive_ms, Some(1_000));
        assert_eq!(base.max_subscribers, Some(4));
        assert_eq!(base.properties.get("b").map(String::as_str), Some("2"));
        assert_eq!(base.properties.len(), 3);
    }

    #[test]
    fn apply_after_finalize_is_locked() {
        let cell = SettingsCell::default();
        cell.apply(&settings(Some(500), &[]))
            .expect("pending settings accept updates");

        let frozen = cell.finalize().clone();

        assert_eq!(
            cell.apply(&settings(Some(900), &[])),
            Err(SettingsError::Locked)
        );
        assert_eq!(cell.effective(), Some(&frozen));
        assert_eq!(frozen.keep_alive_ms, Some(500));
    }

    #[test]
    fn apply_rejects_zero_limits() {
        let cell = SettingsCell::default();
        let invalid = DestinationSettings {
            max_subscribers: Some(0),
            ..Default::default()
        };

        assert!(matches!(
            cell.apply(&invalid),
            Err(SettingsError::Invalid { key, .. }) if key == "max_subscribers"
        ));
        assert!(!cell.is_finalized());
    }
}
