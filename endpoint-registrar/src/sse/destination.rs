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

//! Broadcast-backed SSE destination and the builder that needs a streaming runtime.

use crate::builder::{BuildOutcome, DestinationBuilder};
use crate::context::ResolveContext;
use crate::descriptor::EndpointDescriptor;
use crate::destination::Destination;
use crate::observability::events;
use crate::settings::SettingsCell;
use crate::sse::event::SseEvent;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast::{self, Receiver, Sender};
use tracing::{debug, warn};
use uuid::Uuid;

const COMPONENT: &str = "sse_destination";

/// Capability reported when SSE destinations are requested without a runtime.
pub const SSE_RUNTIME_CAPABILITY: &str = "sse streaming runtime";

const DEFAULT_CHANNEL_CAPACITY: usize = 64;

fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

/// Streaming runtime backing SSE fan-out.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SseRuntime {
    /// Events buffered per subscriber before slow subscribers start lagging.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for SseRuntime {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
pub enum SseError {
    /// Events may only flow once the destination configuration is finalized.
    NotFinalized,
    Closed,
    SubscriberLimit(usize),
}

impl Display for SseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SseError::NotFinalized => write!(f, "sse destination is not finalized"),
            SseError::Closed => write!(f, "sse destination is shut down"),
            SseError::SubscriberLimit(limit) => {
                write!(f, "sse destination already has {limit} subscribers")
            }
        }
    }
}

impl Error for SseError {}

/// Destination fanning [`SseEvent`]s out to every live subscriber.
pub struct SseDestination {
    address: String,
    transport_id: String,
    instance_id: Uuid,
    settings: SettingsCell,
    sender: Mutex<Option<Sender<Arc<SseEvent>>>>,
}

impl SseDestination {
    pub fn new(descriptor: &EndpointDescriptor, runtime: &SseRuntime) -> Self {
        let (sender, _) = broadcast::channel(runtime.channel_capacity.max(1));
        Self {
            address: descriptor.address().to_string(),
            transport_id: descriptor.transport_id().to_string(),
            instance_id: Uuid::new_v4(),
            settings: SettingsCell::default(),
            sender: Mutex::new(Some(sender)),
        }
    }

    fn lock_sender(&self) -> MutexGuard<'_, Option<Sender<Arc<SseEvent>>>> {
        self.sender.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens a subscription, honoring the finalized `max_subscribers` limit. Like
    /// [`publish`][Self::publish], it is refused until configuration is finalized.
    pub fn subscribe(&self) -> Result<Receiver<Arc<SseEvent>>, SseError> {
        let guard = self.lock_sender();
        let Some(sender) = guard.as_ref() else {
            return Err(SseError::Closed);
        };

        let Some(effective) = self.settings.effective() else {
            warn!(
                event = events::SSE_SUBSCRIBE_REJECTED,
                component = COMPONENT,
                address = %self.address,
                instance_id = %self.instance_id,
                reason = "not_finalized",
                "subscribe before configuration was finalized"
            );
            return Err(SseError::NotFinalized);
        };
        if let Some(limit) = effective.max_subscribers {
            if sender.receiver_count() >= limit {
                warn!(
                    event = events::SSE_SUBSCRIBE_REJECTED,
                    component = COMPONENT,
                    address = %self.address,
                    instance_id = %self.instance_id,
                    limit,
                    "subscriber limit reached"
                );
                return Err(SseError::SubscriberLimit(limit));
            }
        }

        let receiver = sender.subscribe();
        debug!(
            event = events::SSE_SUBSCRIBE,
            component = COMPONENT,
            address = %self.address,
            instance_id = %self.instance_id,
            subscribers = sender.receiver_count(),
            "subscriber attached"
        );
        Ok(receiver)
    }

    /// Delivers `event` to current subscribers and returns how many received it.
    pub fn publish(&self, event: SseEvent) -> Result<usize, SseError> {
        if !self.settings.is_finalized() {
            warn!(
                event = events::SSE_PUBLISH_REJECTED,
                component = COMPONENT,
                address = %self.address,
                instance_id = %self.instance_id,
                reason = "not_finalized",
                "publish before configuration was finalized"
            );
            return Err(SseError::NotFinalized);
        }

        let guard = self.lock_sender();
        let Some(sender) = guard.as_ref() else {
            return Err(SseError::Closed);
        };

        // a send error only means nobody is listening
        let delivered = sender.send(Arc::new(event)).unwrap_or(0);
        debug!(
            event = events::SSE_PUBLISH,
            component = COMPONENT,
            address = %self.address,
            instance_id = %self.instance_id,
            delivered,
            "event published"
        );
        Ok(delivered)
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock_sender()
            .as_ref()
            .map(Sender::receiver_count)
            .unwrap_or(0)
    }

    /// Interval for keep-alive comments, once configuration is finalized.
    pub fn keep_alive(&self) -> Option<Duration> {
        self.settings
            .effective()
            .and_then(|settings| settings.keep_alive_ms)
            .map(Duration::from_millis)
    }
}

impl Destination for SseDestination {
    fn address(&self) -> &str {
        &self.address
    }

    fn transport_id(&self) -> &str {
        &self.transport_id
    }

    fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    fn settings(&self) -> &SettingsCell {
        &self.settings
    }

    /// Drops the sender so subscribers observe a closed stream.
    fn shutdown(&self) {
        if self.lock_sender().take().is_some() {
            debug!(
                event = events::SSE_SHUTDOWN,
                component = COMPONENT,
                address = %self.address,
                instance_id = %self.instance_id,
                "sse destination closed"
            );
        }
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Builds [`SseDestination`]s when a streaming runtime is provisioned.
#[derive(Clone, Debug, Default)]
pub struct SseDestinationBuilder {
    runtime: Option<SseRuntime>,
}

impl SseDestinationBuilder {
    pub fn new(runtime: Option<SseRuntime>) -> Self {
        Self { runtime }
    }
}

#[async_trait]
impl DestinationBuilder for SseDestinationBuilder {
    async fn build(
        &self,
        descriptor: &EndpointDescriptor,
        _context: &ResolveContext,
    ) -> BuildOutcome {
        match &self.runtime {
            Some(runtime) => {
                BuildOutcome::Built(Arc::new(SseDestination::new(descriptor, runtime)))
            }
            None => BuildOutcome::unavailable(SSE_RUNTIME_CAPABILITY),
        }
    }
}
