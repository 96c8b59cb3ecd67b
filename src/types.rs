//! Value types shared by the gateways.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// An opaque identifier used as a URL path segment.
///
/// Organization ids, status page subdomains, service ids and metric ids all
/// travel through the gateways as `ResourceId`s. Entity ids are numeric on the
/// wire; the conversion happens here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    /// Create an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as it appears in URLs.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier as a number, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&String> for ResourceId {
    fn from(id: &String) -> Self {
        Self(id.clone())
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self::from(n),
            Raw::Text(s) => Self(s),
        })
    }
}

/// Pagination parameters for list operations.
///
/// Cursors are opaque strings taken from a previous page and passed back
/// verbatim; the client never builds them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Return items before this cursor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Return items after this cursor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Page size, between [`ListQuery::MIN_LIMIT`] and [`ListQuery::MAX_LIMIT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ListQuery {
    /// Smallest page size the service accepts.
    pub const MIN_LIMIT: u32 = 1;
    /// Largest page size the service accepts.
    pub const MAX_LIMIT: u32 = 100;
    /// Page size the service uses when no limit is sent.
    pub const DEFAULT_LIMIT: u32 = 20;

    /// An empty query (first page, server default size).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `before` cursor.
    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    /// Set the `after` cursor.
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs for this query, validating the page size.
    ///
    /// Empty cursors are treated as unset.
    pub fn to_pairs(&self) -> Result<Vec<(&'static str, String)>, Error> {
        let mut pairs = Vec::new();
        if let Some(before) = self.before.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("before", before.to_string()));
        }
        if let Some(after) = self.after.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("after", after.to_string()));
        }
        if let Some(limit) = self.limit {
            if !(Self::MIN_LIMIT..=Self::MAX_LIMIT).contains(&limit) {
                return Err(Error::InvalidRequest(format!(
                    "limit must be between {} and {}, got {}",
                    Self::MIN_LIMIT,
                    Self::MAX_LIMIT,
                    limit
                )));
            }
            pairs.push(("limit", limit.to_string()));
        }
        Ok(pairs)
    }
}
