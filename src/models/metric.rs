use serde::{Deserialize, Serialize};

use super::{null_as_default, Entity};
use crate::types::ResourceId;

/// What a metric measures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricType {
    /// Uptime percentage.
    #[serde(rename = "up")]
    Uptime,
    /// Response time.
    #[serde(rename = "rt")]
    ResponseTime,
    /// A type this crate does not know, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// How the headline number of a metric is aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeaturedNumber {
    /// Average over the displayed period.
    Avg,
    /// Maximum over the displayed period.
    Max,
    /// Most recent value.
    Last,
    /// An aggregation this crate does not know, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// A measurement displayed on a status page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metric {
    /// Server-assigned id. Read-only.
    #[serde(skip_serializing)]
    pub id: Option<i64>,
    /// Current status computed by the service. Read-only.
    #[serde(skip_serializing)]
    pub status: Option<String>,
    /// Unix time of the latest data point. Read-only.
    #[serde(skip_serializing)]
    pub latest_entry_time: Option<i64>,
    /// Display position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Title shown above the chart.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Unit of the values, e.g. `ms` or `%`.
    #[serde(deserialize_with = "null_as_default")]
    pub unit: String,
    /// Kind of measurement.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<MetricType>,
    /// Whether the metric collects data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Whether the metric is shown on the status page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// Id of the series in the integration the data comes from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
    /// Name of the series in the integration the data comes from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_name: Option<String>,
    /// Alerting threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<i64>,
    /// Aggregation of the headline number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_number: Option<FeaturedNumber>,
    /// Integration supplying the data. Always sent; `null` means manually fed,
    /// so an update can detach the metric from its integration.
    pub integration_id: Option<i64>,
}

impl Entity for Metric {
    const SINGULAR: &'static str = "metric";
    const PLURAL: &'static str = "metrics";
}

impl Metric {
    /// A metric with a title, unit and type.
    pub fn new(title: impl Into<String>, unit: impl Into<String>, metric_type: MetricType) -> Self {
        Self {
            title: title.into(),
            unit: unit.into(),
            metric_type: Some(metric_type),
            ..Default::default()
        }
    }

    /// The id as a path segment, once the metric exists.
    pub fn resource_id(&self) -> Option<ResourceId> {
        self.id.map(ResourceId::from)
    }
}
