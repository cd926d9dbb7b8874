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

//! Server-Sent-Events destinations.
//!
//! SSE destinations share the HTTP listener registry but need a streaming runtime to
//! fan events out to subscribers. The runtime is optional: without it the SSE transport
//! factory still registers, and every first resolution reports the missing capability.

pub(crate) mod destination;
pub(crate) mod event;
pub(crate) mod factory;
