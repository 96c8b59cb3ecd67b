//! The provider boundary.
//!
//! [`StatuspalProvider`] is constructed once per plugin process. The host
//! validates and then configures it with the provider configuration record;
//! afterwards every resource handler obtains the shared [`Client`] through
//! [`StatuspalProvider::client`].

use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::client::{Client, RateLimiter};
use crate::config::{Environment, ProviderConfig};
use crate::diagnostics::{has_errors, Diagnostic};
use crate::error::Error;

/// The StatusPal provider.
///
/// Owns the process-wide rate limiter, so every client it builds, including
/// one built by a later `configure`, draws from the same budget.
#[derive(Debug)]
pub struct StatuspalProvider {
    version: String,
    limiter: Arc<RateLimiter>,
    client: RwLock<Option<Client>>,
}

impl StatuspalProvider {
    /// A provider with the default rate limit.
    pub fn new(version: impl Into<String>) -> Self {
        Self::with_rate_limiter(version, Arc::new(RateLimiter::default()))
    }

    /// A provider whose clients wait on `limiter`.
    pub fn with_rate_limiter(version: impl Into<String>, limiter: Arc<RateLimiter>) -> Self {
        Self {
            version: version.into(),
            limiter,
            client: RwLock::new(None),
        }
    }

    /// The provider version reported to the host.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Check a configuration record without building a client.
    #[instrument(skip_all, name = "provider.validate_provider_config")]
    pub fn validate_provider_config(&self, config: &Value) -> Vec<Diagnostic> {
        let environment = Environment::from_env();
        let diagnostics = match ProviderConfig::from_value(config.clone()) {
            Ok(config) => config.validate(environment),
            Err(diagnostics) => diagnostics,
        };
        if has_errors(&diagnostics) {
            warn!(
                diagnostics = diagnostics.len(),
                "Provider configuration is invalid"
            );
        }
        diagnostics
    }

    /// Resolve `config` and build the shared client.
    ///
    /// On error diagnostics the previously configured client, if any, is kept.
    #[instrument(skip_all, name = "provider.configure")]
    pub fn configure(&self, config: Value) -> Vec<Diagnostic> {
        info!("Configuring StatusPal client");

        let environment = Environment::from_env();
        let client_config = match ProviderConfig::from_value(config)
            .and_then(|config| config.resolve(environment))
        {
            Ok(client_config) => client_config,
            Err(diagnostics) => {
                warn!(
                    ?environment,
                    diagnostics = diagnostics.len(),
                    "StatusPal client configuration failed"
                );
                return diagnostics;
            }
        };

        debug!(?environment, endpoint = ?client_config.endpoint, "Creating StatusPal client");

        let client = match Client::new(client_config, Arc::clone(&self.limiter)) {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "Unable to create StatusPal client");
                return vec![Diagnostic::error("Unable to Create StatusPal API Client")
                    .with_detail(format!(
                        "An unexpected error occurred when creating the StatusPal API client.\n\n\
                         StatusPal Client Error: {}",
                        e
                    ))];
            }
        };

        match self.client.write() {
            Ok(mut slot) => *slot = Some(client),
            Err(poisoned) => *poisoned.into_inner() = Some(client),
        }

        info!(success = true, "Configured StatusPal client");
        Vec::new()
    }

    /// The configured client.
    pub fn client(&self) -> Result<Client, Error> {
        let slot = match self.client.read() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.clone()
            .ok_or_else(|| Error::Configuration("provider has not been configured".to_string()))
    }

    /// Whether [`configure`](Self::configure) has succeeded at least once.
    pub fn is_configured(&self) -> bool {
        self.client().is_ok()
    }
}
