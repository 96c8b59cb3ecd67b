//! Wire entities exchanged with the StatusPal API.
//!
//! Every optional attribute is an `Option`: a field the service sends as
//! `null` or leaves out decodes to `None`, and `None` is left out of request
//! bodies, so "not specified" never collapses into `false` or `0`. Fields the
//! service computes (ids, timestamps, status) are decoded but never sent.

mod metric;
mod service;
mod status_page;

pub use metric::{FeaturedNumber, Metric, MetricType};
pub use service::{
    Monitoring, MonitoringOptions, MonitoringOptionsHeader, Service, ServiceTranslation,
    WebhookCustomJsonpathSettings, CUSTOM_JSONPATH_SERVICE,
};
pub use status_page::{StatusPage, StatusPageTranslation, ThemeConfigs};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// An entity with its envelope keys.
///
/// Single items travel as `{"<SINGULAR>": {...}}`, collections as
/// `{"<PLURAL>": [...]}`.
pub trait Entity: Serialize + DeserializeOwned {
    /// Envelope key for one item.
    const SINGULAR: &'static str;
    /// Envelope key for a collection.
    const PLURAL: &'static str;
}

/// Decode `null` as the type's default, for fields the service may null out
/// but callers always want a value for.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
