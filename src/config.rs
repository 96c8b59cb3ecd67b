//! Provider configuration.
//!
//! The host hands the provider a configuration record. Which attributes it
//! needs depends on the deployment mode selected by [`ENV_MODE`]:
//!
//! | Mode        | `TF_ENV`       | Needs               | Endpoint           |
//! |-------------|----------------|---------------------|--------------------|
//! | production  | anything else  | `api_key`, `region` | regional cloud URL |
//! | development | `DEV`          | `api_key`           | [`LOCAL_BASE_URL`] |
//! | test        | `TEST`         | `test_url`          | `test_url`         |
//!
//! `api_key` and `region` fall back to [`ENV_API_KEY`] and [`ENV_REGION`]
//! when the record leaves them unset. A value set in the record wins even if
//! it is empty.
//!
//! [`LOCAL_BASE_URL`]: crate::client::LOCAL_BASE_URL

use std::env;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{ClientConfig, Endpoint, Region};
use crate::diagnostics::Diagnostic;

/// Environment variable selecting the deployment mode.
pub const ENV_MODE: &str = "TF_ENV";
/// Environment variable consulted when `api_key` is unset.
pub const ENV_API_KEY: &str = "STATUSPAL_API_KEY";
/// Environment variable consulted when `region` is unset.
pub const ENV_REGION: &str = "STATUSPAL_REGION";

const MISSING_API_KEY: &str = "Missing StatusPal API Key";
const INVALID_REGION: &str = "Missing or Invalid StatusPal API Region";
const MISSING_TEST_URL: &str = "Missing StatusPal Test URL";
const INVALID_TEST_URL: &str = "Invalid StatusPal Test URL";

/// Deployment mode of the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Regional cloud deployment.
    #[default]
    Production,
    /// A local StatusPal instance.
    Development,
    /// A test server at an explicit URL.
    Test,
}

impl Environment {
    /// Mode for a value of [`ENV_MODE`]. Matching is exact.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("DEV") => Self::Development,
            Some("TEST") => Self::Test,
            _ => Self::Production,
        }
    }

    /// Mode of the current process.
    pub fn from_env() -> Self {
        Self::parse(env::var(ENV_MODE).ok().as_deref())
    }
}

/// The provider configuration record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API key sent with every request.
    pub api_key: Option<String>,
    /// Region code, `EU` or `US`, case-insensitive.
    pub region: Option<String>,
    /// Base URL of a test server. Only read in test mode.
    pub test_url: Option<String>,
}

impl ProviderConfig {
    /// Parse the record. `null` is an empty record.
    pub fn from_value(value: Value) -> Result<Self, Vec<Diagnostic>> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| {
            vec![Diagnostic::error("Invalid provider configuration").with_detail(e.to_string())]
        })
    }

    /// Check the values set in the record, without consulting the environment.
    ///
    /// Missing values are not reported here since they may come from
    /// environment variables at configure time.
    pub fn validate(&self, environment: Environment) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        match environment {
            Environment::Production => {
                if let Some(region) = self.region.as_deref() {
                    if !region.is_empty() && region.parse::<Region>().is_err() {
                        diagnostics.push(invalid_region());
                    }
                }
            }
            Environment::Test => {
                if let Some(url) = self.test_url.as_deref() {
                    if let Err(e) = Endpoint::custom(url) {
                        diagnostics.push(invalid_test_url(&e.to_string()));
                    }
                }
            }
            Environment::Development => {}
        }
        diagnostics
    }

    /// Resolve the record and the environment fallbacks into a client
    /// configuration.
    ///
    /// Every problem is reported as a diagnostic against the attribute it
    /// concerns.
    pub fn resolve(&self, environment: Environment) -> Result<ClientConfig, Vec<Diagnostic>> {
        match environment {
            Environment::Production => {
                let api_key = self.api_key_or_env();
                let region = self
                    .region
                    .clone()
                    .or_else(|| env::var(ENV_REGION).ok())
                    .unwrap_or_default()
                    .to_uppercase();

                let mut diagnostics = Vec::new();
                if api_key.is_empty() {
                    diagnostics.push(missing_api_key());
                }
                let region = region.parse::<Region>();
                if region.is_err() {
                    diagnostics.push(invalid_region());
                }

                match region {
                    Ok(region) if diagnostics.is_empty() => {
                        Ok(ClientConfig::new(Some(api_key), Endpoint::Region(region)))
                    }
                    _ => Err(diagnostics),
                }
            }
            Environment::Development => {
                let api_key = self.api_key_or_env();
                if api_key.is_empty() {
                    return Err(vec![missing_api_key()]);
                }
                Ok(ClientConfig::new(Some(api_key), Endpoint::Local))
            }
            Environment::Test => {
                let Some(url) = self.test_url.as_deref().filter(|url| !url.is_empty()) else {
                    return Err(vec![Diagnostic::error(MISSING_TEST_URL)
                        .with_detail(
                            "The provider cannot create the StatusPal API client as there is a \
                             missing or empty value for the test server URL. Set test_url in \
                             the configuration.",
                        )
                        .with_attribute("test_url")]);
                };
                let endpoint =
                    Endpoint::custom(url).map_err(|e| vec![invalid_test_url(&e.to_string())])?;
                let api_key = Some(self.api_key_or_env()).filter(|key| !key.is_empty());
                Ok(ClientConfig::new(api_key, endpoint))
            }
        }
    }

    fn api_key_or_env(&self) -> String {
        self.api_key
            .clone()
            .or_else(|| env::var(ENV_API_KEY).ok())
            .unwrap_or_default()
    }
}

fn missing_api_key() -> Diagnostic {
    Diagnostic::error(MISSING_API_KEY)
        .with_detail(format!(
            "The provider cannot create the StatusPal API client as there is a missing or empty \
             value for the StatusPal API key. Set the api key value in the configuration or use \
             the {} environment variable. If either is already set, ensure the value is not empty.",
            ENV_API_KEY
        ))
        .with_attribute("api_key")
}

fn invalid_region() -> Diagnostic {
    Diagnostic::error(INVALID_REGION)
        .with_detail(format!(
            "The provider cannot create the StatusPal API client as there is a missing, empty or \
             invalid value for the StatusPal API region. Set the region value in the \
             configuration or use the {} environment variable. If either is already set, ensure \
             the value is not empty and it can be only \"EU\" or \"US\".",
            ENV_REGION
        ))
        .with_attribute("region")
}

fn invalid_test_url(reason: &str) -> Diagnostic {
    Diagnostic::error(INVALID_TEST_URL)
        .with_detail(format!(
            "The test server URL must be an absolute http or https URL: {}",
            reason
        ))
        .with_attribute("test_url")
}
