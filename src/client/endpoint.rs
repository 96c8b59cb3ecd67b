//! Endpoint selection: which StatusPal deployment a client talks to.

use std::fmt;
use std::str::FromStr;

use reqwest::Url;

use crate::error::Error;

/// Base URL used when neither a region nor an override URL is configured.
pub const LOCAL_BASE_URL: &str = "http://local.statuspal.io:4000/api/v2";

/// A StatusPal deployment region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// The European deployment, `statuspal.eu`.
    Eu,
    /// The United States deployment, `statuspal.io`.
    Us,
}

impl Region {
    /// Every accepted region.
    pub const ALL: [Region; 2] = [Region::Eu, Region::Us];

    /// The configuration code for this region.
    pub fn code(self) -> &'static str {
        match self {
            Self::Eu => "EU",
            Self::Us => "US",
        }
    }

    fn top_level_domain(self) -> &'static str {
        match self {
            Self::Eu => "eu",
            Self::Us => "io",
        }
    }

    /// The API base URL of this region.
    pub fn base_url(self) -> String {
        format!("https://statuspal.{}/api/v2", self.top_level_domain())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = Error;

    /// Parse a region code, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|region| region.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "unknown region {:?}, expected \"EU\" or \"US\"",
                    s
                ))
            })
    }
}

/// The base URL a client is bound to. Exactly one variant is active per client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// A production region.
    Region(Region),
    /// An explicit URL, used by tests against a mock server.
    Custom(Url),
    /// The local development server, [`LOCAL_BASE_URL`].
    Local,
}

impl Endpoint {
    /// Select the endpoint from an optional region and an optional override URL.
    ///
    /// A region wins over the override; with neither the local development
    /// server is used. Empty strings count as unset. An unknown region is an
    /// error, not a fallback.
    pub fn select(region: Option<&str>, override_url: Option<&str>) -> Result<Self, Error> {
        let region = region.filter(|r| !r.is_empty());
        let override_url = override_url.filter(|u| !u.is_empty());
        match (region, override_url) {
            (Some(region), _) => Ok(Self::Region(region.parse()?)),
            (None, Some(url)) => Self::custom(url),
            (None, None) => Ok(Self::Local),
        }
    }

    /// An endpoint bound to `url` verbatim.
    pub fn custom(url: &str) -> Result<Self, Error> {
        let parsed = Url::parse(url)
            .map_err(|e| Error::Configuration(format!("invalid URL {:?}: {}", url, e)))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Configuration(format!(
                "invalid URL {:?}: expected an absolute http(s) URL",
                url
            )));
        }
        Ok(Self::Custom(parsed))
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> Result<Url, Error> {
        match self {
            Self::Region(region) => parse_base(&region.base_url()),
            Self::Custom(url) => Ok(url.clone()),
            Self::Local => parse_base(LOCAL_BASE_URL),
        }
    }
}

fn parse_base(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|e| Error::Configuration(format!("invalid URL {:?}: {}", url, e)))
}
