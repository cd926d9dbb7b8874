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

//! Canonical structured field keys and value-format helpers.

use crate::control_plane::registrar::LockScope;

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const ADDRESS: &str = "address";
pub const TRANSPORT_ID: &str = "transport_id";
pub const INSTANCE_ID: &str = "instance_id";
pub const LOCK_SCOPE: &str = "lock_scope";
pub const CAPABILITY: &str = "capability";
pub const CONTEXT: &str = "context";
pub const REASON: &str = "reason";
pub const ERR: &str = "err";

pub const NONE: &str = "none";

pub fn lock_scope_label(lock_scope: LockScope) -> &'static str {
    match lock_scope {
        LockScope::Registry => "registry",
        LockScope::Insert => "insert",
    }
}

pub fn format_transport_ids<S: AsRef<str>>(transport_ids: &[S]) -> String {
    if transport_ids.is_empty() {
        return NONE.to_string();
    }
    transport_ids
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}
