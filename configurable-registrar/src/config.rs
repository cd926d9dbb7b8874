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

use endpoint_registrar::{
    EndpointDescriptor, LockScope, ResolveContext, SseRuntime, HTTP_TRANSPORT_ID,
    SSE_TRANSPORT_ID,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::error::Error;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub(crate) registrar: RegistrarConfig,
    #[serde(default)]
    pub(crate) sse: SseConfig,
    pub(crate) context: ResolveContext,
    pub(crate) endpoints: Vec<EndpointConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct RegistrarConfig {
    #[serde(default)]
    pub(crate) lock_scope: LockScope,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct SseConfig {
    /// Without a runtime every SSE endpoint resolves as unavailable.
    #[serde(default)]
    pub(crate) runtime: Option<SseRuntime>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    Http,
    Sse,
}

impl TransportKind {
    pub fn transport_id(self) -> &'static str {
        match self {
            TransportKind::Http => HTTP_TRANSPORT_ID,
            TransportKind::Sse => SSE_TRANSPORT_ID,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    pub(crate) name: String,
    pub(crate) address: String,
    pub(crate) transport: TransportKind,
    #[serde(default)]
    pub(crate) metadata: BTreeMap<String, String>,
}

impl EndpointConfig {
    pub fn descriptor(&self) -> EndpointDescriptor {
        self.metadata.iter().fold(
            EndpointDescriptor::new(&self.address, self.transport.transport_id()),
            |descriptor, (key, value)| descriptor.with_metadata(key, value),
        )
    }
}

impl Config {
    pub fn from_json5(contents: &str) -> Result<Self, Box<dyn Error>> {
        let config: Config = json5::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Box<dyn Error>> {
        self.context.validate()?;

        let mut names = HashSet::new();
        for endpoint in &self.endpoints {
            if !names.insert(endpoint.name.as_str()) {
                return Err(format!("Duplicate endpoint name found: {}", endpoint.name).into());
            }
        }
        Ok(())
    }
}
