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

//! Normalized path key used for registry identity.

use crate::error::ResolveError;
use std::fmt::{Display, Formatter};

/// Path projection of an endpoint address.
///
/// Destinations sharing one listener are told apart by path only, so scheme, authority,
/// query and fragment are dropped and trailing slashes collapsed.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct AddressKey {
    path: String,
}

impl AddressKey {
    pub(crate) fn parse(address: &str) -> Result<Self, ResolveError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ResolveError::Configuration(
                "endpoint address must not be empty".to_string(),
            ));
        }

        let address = address
            .split(&['?', '#'][..])
            .next()
            .unwrap_or_default();

        let path = match split_scheme(address) {
            Some(rest) => {
                if rest.is_empty() {
                    return Err(ResolveError::Configuration(format!(
                        "endpoint address {address} has no authority or path"
                    )));
                }
                rest.find('/').map(|index| &rest[index..]).unwrap_or("/")
            }
            None => address,
        };
        let path = path.trim_end_matches('/');

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        Ok(Self { path })
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.path
    }
}

/// Remainder after `scheme://`, when the address starts with a well-formed scheme.
fn split_scheme(address: &str) -> Option<&str> {
    let (scheme, rest) = address.split_once("://")?;
    let mut chars = scheme.chars();
    let well_formed = chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    well_formed.then_some(rest)
}

impl Display for AddressKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}
