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

//! Failure taxonomy for destination resolution and configuration.

use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Failures surfaced synchronously to `resolve` callers.
///
/// None of these leave partial state in the registry.
#[derive(Debug, Eq, PartialEq)]
pub enum ResolveError {
    /// Invalid descriptor, unusable address or unknown transport. Never retried.
    Configuration(String),
    /// The builder lacks an optional capability. Callers may retry once it is provisioned.
    Unavailable { address: String, capability: String },
    /// The configurer rejected the settings for a freshly built destination.
    Configure {
        address: String,
        source: SettingsError,
    },
    /// A second destination was about to be registered for an occupied address.
    DuplicateDestination { address: String },
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Configuration(reason) => {
                write!(f, "invalid endpoint configuration: {reason}")
            }
            ResolveError::Unavailable {
                address,
                capability,
            } => write!(
                f,
                "no destination available for {address}: {capability} is not available"
            ),
            ResolveError::Configure { address, source } => {
                write!(f, "failed to configure destination for {address}: {source}")
            }
            ResolveError::DuplicateDestination { address } => write!(
                f,
                "registry already holds a destination for {address}"
            ),
        }
    }
}

impl Error for ResolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ResolveError::Configure { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failures applying settings to a destination.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SettingsError {
    /// The destination configuration was already finalized.
    Locked,
    Invalid { key: String, reason: String },
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Locked => write!(f, "destination configuration is finalized"),
            SettingsError::Invalid { key, reason } => {
                write!(f, "invalid setting {key}: {reason}")
            }
        }
    }
}

impl Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::{ResolveError, SettingsError};
    use std::error::Error;

    #[test]
    fn unavailable_error_names_missing_capability() {
        let error = ResolveError::Unavailable {
            address: "/svc/a".to_string(),
            capability: "sse streaming runtime".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "no destination available for /svc/a: sse streaming runtime is not available"
        );
        assert!(error.source().is_none());
    }

    #[test]
    fn configure_error_exposes_settings_source() {
        let error = ResolveError::Configure {
            address: "/svc/a".to_string(),
            source: SettingsError::Locked,
        };

        assert!(error.to_string().contains("failed to configure destination"));
        assert_eq!(
            error.source().map(ToString::to_string),
            Some("destination configuration is finalized".to_string())
        );
        assert_eq!(
            format!("{error:?}"),
            r#"Configure { address: "/svc/a", source: Locked }"#
        );
    }
}
