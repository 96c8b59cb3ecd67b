use reqwest::{Method, Url};
use tracing::instrument;

use crate::client::Client;
use crate::error::Error;
use crate::models::Metric;
use crate::types::{ListQuery, ResourceId};

/// Metrics shown on a status page.
///
/// URLs: `{base}/status_pages/{subdomain}/metrics[/{metric_id}]`. Listing is
/// paginated with [`ListQuery`].
#[derive(Debug, Clone, Copy)]
pub struct Metrics<'a> {
    client: &'a Client,
}

impl<'a> Metrics<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_url(&self, subdomain: &ResourceId) -> Url {
        self.client
            .url(["status_pages", subdomain.as_str(), "metrics"])
    }

    fn item_url(&self, subdomain: &ResourceId, metric_id: &ResourceId) -> Url {
        self.client.url([
            "status_pages",
            subdomain.as_str(),
            "metrics",
            metric_id.as_str(),
        ])
    }

    /// One page of the status page's metrics.
    ///
    /// Fails with [`Error::InvalidRequest`] before sending anything if the
    /// query's limit is out of range.
    #[instrument(
        skip_all,
        fields(subdomain = %subdomain, limit = ?query.limit),
        name = "metrics.list"
    )]
    pub async fn list(
        &self,
        subdomain: &ResourceId,
        query: &ListQuery,
    ) -> Result<Vec<Metric>, Error> {
        let pairs = query.to_pairs()?;
        let request = super::build(
            self.client
                .request(Method::GET, self.collection_url(subdomain))
                .query(&pairs),
        )?;
        self.client.fetch_all(request).await
    }

    /// The metric with `metric_id`.
    #[instrument(
        skip_all,
        fields(subdomain = %subdomain, metric_id = %metric_id),
        name = "metrics.get"
    )]
    pub async fn get(&self, subdomain: &ResourceId, metric_id: &ResourceId) -> Result<Metric, Error> {
        self.client
            .fetch_one(self.item_url(subdomain, metric_id))
            .await
    }

    /// Create a metric and return it as stored by the service.
    #[instrument(skip_all, fields(subdomain = %subdomain), name = "metrics.create")]
    pub async fn create(&self, subdomain: &ResourceId, metric: &Metric) -> Result<Metric, Error> {
        self.client
            .send_one(Method::POST, self.collection_url(subdomain), metric)
            .await
    }

    /// Replace the metric with `metric_id` and return the stored result.
    #[instrument(
        skip_all,
        fields(subdomain = %subdomain, metric_id = %metric_id),
        name = "metrics.update"
    )]
    pub async fn update(
        &self,
        subdomain: &ResourceId,
        metric_id: &ResourceId,
        metric: &Metric,
    ) -> Result<Metric, Error> {
        self.client
            .send_one(Method::PUT, self.item_url(subdomain, metric_id), metric)
            .await
    }

    /// Delete the metric with `metric_id`.
    #[instrument(
        skip_all,
        fields(subdomain = %subdomain, metric_id = %metric_id),
        name = "metrics.delete"
    )]
    pub async fn delete(&self, subdomain: &ResourceId, metric_id: &ResourceId) -> Result<(), Error> {
        self.client
            .remove(self.item_url(subdomain, metric_id))
            .await
    }
}
