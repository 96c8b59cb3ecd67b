//! StatusPal Provider
//!
//! This crate implements the client side of an infrastructure-as-code provider
//! for [StatusPal](https://www.statuspal.io): a rate-limited REST client and
//! gateways for status pages, services and metrics, plus the provider
//! boundary that turns a host configuration record into one shared client.
//!
//! # Overview
//!
//! The crate provides:
//!
//! - **Client**: An HTTP client bound to one deployment, injecting the API key
//!   and classifying failure statuses into [`ApiError`]s
//! - **Rate limiting**: A token bucket shared by every clone of a client
//! - **Gateways**: List, get, create, update and delete for each entity
//! - **Models**: Serde records for the wire entities
//! - **Provider**: Configuration resolution with environment fallbacks,
//!   reported as [`Diagnostic`]s
//! - **Logging**: Integration with `tracing` for structured logging
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use statuspal_provider::{Client, ClientConfig, Endpoint, RateLimiter, Region, ResourceId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), statuspal_provider::Error> {
//!     statuspal_provider::init_logging();
//!
//!     let config = ClientConfig::new(Some("api-key".into()), Endpoint::Region(Region::Us));
//!     let client = Client::new(config, Arc::new(RateLimiter::default()))?;
//!
//!     let subdomain = ResourceId::from("acme");
//!     for service in client.services().list(&subdomain).await? {
//!         println!("{}: {:?}", service.name, service.monitoring);
//!     }
//!
//!     match client.services().get(&subdomain, &ResourceId::from(42)).await {
//!         Ok(service) => println!("found {}", service.name),
//!         Err(e) if e.is_not_found() => println!("service is gone"),
//!         Err(e) => return Err(e),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Provider Boundary
//!
//! A plugin host constructs one [`StatuspalProvider`] per process and drives
//! it through:
//!
//! - **ValidateProviderConfig**: [`StatuspalProvider::validate_provider_config`]
//! - **Configure**: [`StatuspalProvider::configure`], which builds the client
//! - **Resource operations**: handlers call [`StatuspalProvider::client`] and
//!   the gateways

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod provider;
pub mod testing;
pub mod types;

// Re-export main types at crate root
pub use client::{Client, ClientConfig, Endpoint, RateLimiter, Region};
pub use config::{Environment, ProviderConfig};
pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub use error::{ApiError, Error};
pub use gateway::{Metrics, Services, StatusPages};
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use models::{Metric, Service, StatusPage};
pub use provider::StatuspalProvider;
pub use types::{ListQuery, ResourceId};

// Re-export commonly used external types
pub use serde_json;
pub use tracing;
