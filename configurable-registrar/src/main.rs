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

mod config;

use crate::config::Config;
use clap::Parser;
use endpoint_registrar::{
    Destination, DestinationRegistry, HttpTransportFactory, ResolveError, SseTransportFactory,
    TransportFactoryManager,
};
use std::error::Error;
use std::fs;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command()]
struct RegistrarArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt::try_init();

    info!("Started configurable-registrar");

    let args = RegistrarArgs::parse();
    let contents = fs::read_to_string(&args.config)
        .map_err(|e| format!("Unable to read config file {}: {e}", args.config))?;
    let config =
        Config::from_json5(&contents).map_err(|e| format!("Unable to parse config file: {e}"))?;

    let lock_scope = config.registrar.lock_scope;
    let registry = Arc::new(DestinationRegistry::new());
    let http_factory =
        HttpTransportFactory::new(Some(registry.clone())).with_lock_scope(lock_scope);
    let sse_factory = SseTransportFactory::new(Some(registry.clone()), config.sse.runtime.clone())
        .with_lock_scope(lock_scope);

    if config.sse.runtime.is_none() {
        warn!("No SSE runtime configured; SSE endpoints will be unavailable");
    }

    let manager = TransportFactoryManager::new();
    manager.register(Arc::new(http_factory)).await;
    manager.register(Arc::new(sse_factory)).await;

    let mut unavailable = 0;
    for endpoint in &config.endpoints {
        let descriptor = endpoint.descriptor();
        match manager.get_destination(&descriptor, &config.context).await {
            Ok(destination) => {
                info!(
                    name = %endpoint.name,
                    address = destination.address(),
                    transport_id = destination.transport_id(),
                    instance_id = %destination.instance_id(),
                    "Endpoint published"
                );
            }
            Err(err @ ResolveError::Unavailable { .. }) => {
                unavailable += 1;
                warn!(name = %endpoint.name, err = %err, "Endpoint not published");
            }
            Err(err) => {
                return Err(format!("Unable to publish endpoint {}: {err}", endpoint.name).into());
            }
        }
    }

    info!(
        paths = ?registry.destination_paths().await,
        unavailable,
        "Registration complete"
    );

    Ok(())
}
