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

use crate::error::ResolveError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// [`EndpointDescriptor`] is the caller-supplied identity of an endpoint: the address it
/// should be reachable at, the transport namespace serving it and free-form
/// transport-specific metadata.
///
/// The registrar only ever borrows a descriptor, so it is effectively immutable once
/// passed to [`EndpointRegistrar::resolve`][crate::EndpointRegistrar::resolve].
///
/// # Examples
///
/// ```
/// use endpoint_registrar::EndpointDescriptor;
///
/// let descriptor = EndpointDescriptor::new("/svc/a", "http://registrar/transports/http/sse")
///     .with_metadata("owner", "billing");
///
/// assert_eq!(descriptor.address(), "/svc/a");
/// assert_eq!(descriptor.metadata().get("owner").map(String::as_str), Some("billing"));
/// assert!(descriptor.validate().is_ok());
/// assert!(EndpointDescriptor::new("  ", "http").validate().is_err());
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointDescriptor {
    pub(crate) address: String,
    #[serde(rename = "transport")]
    pub(crate) transport_id: String,
    #[serde(default)]
    pub(crate) metadata: BTreeMap<String, String>,
}

impl EndpointDescriptor {
    pub fn new(address: &str, transport_id: &str) -> Self {
        Self {
            address: address.to_string(),
            transport_id: transport_id.to_string(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn transport_id(&self) -> &str {
        &self.transport_id
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Rejects descriptors that can never name a destination.
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.address.trim().is_empty() {
            return Err(ResolveError::Configuration(
                "endpoint descriptor address must not be empty".to_string(),
            ));
        }
        if self.transport_id.trim().is_empty() {
            return Err(ResolveError::Configuration(format!(
                "endpoint descriptor for {} has no transport id",
                self.address
            )));
        }
        Ok(())
    }
}
