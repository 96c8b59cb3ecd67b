use reqwest::{Method, Url};
use tracing::instrument;

use crate::client::Client;
use crate::error::Error;
use crate::models::Service;
use crate::types::ResourceId;

/// Services shown on a status page.
///
/// URLs: `{base}/status_pages/{subdomain}/services[/{service_id}]`. Create and
/// update send [`Service::to_request`], so monitoring records that do not
/// match the selected monitoring mode are never transmitted.
#[derive(Debug, Clone, Copy)]
pub struct Services<'a> {
    client: &'a Client,
}

impl<'a> Services<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_url(&self, subdomain: &ResourceId) -> Url {
        self.client
            .url(["status_pages", subdomain.as_str(), "services"])
    }

    fn item_url(&self, subdomain: &ResourceId, service_id: &ResourceId) -> Url {
        self.client.url([
            "status_pages",
            subdomain.as_str(),
            "services",
            service_id.as_str(),
        ])
    }

    /// All services of the status page, in server order.
    #[instrument(skip_all, fields(subdomain = %subdomain), name = "services.list")]
    pub async fn list(&self, subdomain: &ResourceId) -> Result<Vec<Service>, Error> {
        let url = self.collection_url(subdomain);
        let request = super::build(self.client.request(Method::GET, url))?;
        self.client.fetch_all(request).await
    }

    /// The service with `service_id`.
    #[instrument(
        skip_all,
        fields(subdomain = %subdomain, service_id = %service_id),
        name = "services.get"
    )]
    pub async fn get(
        &self,
        subdomain: &ResourceId,
        service_id: &ResourceId,
    ) -> Result<Service, Error> {
        self.client
            .fetch_one(self.item_url(subdomain, service_id))
            .await
    }

    /// Create a service and return it as stored by the service.
    #[instrument(skip_all, fields(subdomain = %subdomain), name = "services.create")]
    pub async fn create(&self, subdomain: &ResourceId, service: &Service) -> Result<Service, Error> {
        self.client
            .send_one(
                Method::POST,
                self.collection_url(subdomain),
                &service.to_request(),
            )
            .await
    }

    /// Replace the service with `service_id` and return the stored result.
    #[instrument(
        skip_all,
        fields(subdomain = %subdomain, service_id = %service_id),
        name = "services.update"
    )]
    pub async fn update(
        &self,
        subdomain: &ResourceId,
        service_id: &ResourceId,
        service: &Service,
    ) -> Result<Service, Error> {
        self.client
            .send_one(
                Method::PUT,
                self.item_url(subdomain, service_id),
                &service.to_request(),
            )
            .await
    }

    /// Delete the service with `service_id`.
    #[instrument(
        skip_all,
        fields(subdomain = %subdomain, service_id = %service_id),
        name = "services.delete"
    )]
    pub async fn delete(&self, subdomain: &ResourceId, service_id: &ResourceId) -> Result<(), Error> {
        self.client
            .remove(self.item_url(subdomain, service_id))
            .await
    }
}
