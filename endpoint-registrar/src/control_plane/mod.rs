//! Control-plane layer.
//!
//! Owns the destination registry, its address identity model and the registrar that
//! publishes each destination exactly once. This layer is responsible for idempotent
//! resolution and rollback-safe transitions when a destination cannot be configured.
//!
//! ```
//! use async_trait::async_trait;
//! use endpoint_registrar::{
//!     BuildOutcome, DestinationBuilder, DestinationRegistry, EndpointDescriptor,
//!     EndpointRegistrar, ResolveContext, ResolveError,
//! };
//! use std::sync::Arc;
//!
//! struct MissingRuntime;
//!
//! #[async_trait]
//! impl DestinationBuilder for MissingRuntime {
//!     async fn build(
//!         &self,
//!         _descriptor: &EndpointDescriptor,
//!         _context: &ResolveContext,
//!     ) -> BuildOutcome {
//!         BuildOutcome::unavailable("streaming runtime")
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let registry = Arc::new(DestinationRegistry::new());
//! let registrar = EndpointRegistrar::new(registry.clone(), Arc::new(MissingRuntime));
//!
//! // A missing capability surfaces as a typed error and registers nothing.
//! let result = registrar
//!     .resolve(&EndpointDescriptor::new("/svc/a", "sse"), &ResolveContext::new("doc"))
//!     .await;
//! assert!(matches!(result, Err(ResolveError::Unavailable { .. })));
//! assert!(registry.is_empty().await);
//! # });
//! ```

pub(crate) mod address_key;
pub(crate) mod destination_registry;
pub(crate) mod registrar;
