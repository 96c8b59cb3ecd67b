use reqwest::{Method, Url};
use tracing::instrument;

use crate::client::Client;
use crate::error::Error;
use crate::models::StatusPage;
use crate::types::ResourceId;

/// Status pages of an organization, addressed by subdomain.
///
/// URLs: `{base}/orgs/{organization_id}/status_pages[/{subdomain}]`.
#[derive(Debug, Clone, Copy)]
pub struct StatusPages<'a> {
    client: &'a Client,
}

impl<'a> StatusPages<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_url(&self, organization_id: &ResourceId) -> Url {
        self.client
            .url(["orgs", organization_id.as_str(), "status_pages"])
    }

    fn item_url(&self, organization_id: &ResourceId, subdomain: &ResourceId) -> Url {
        self.client.url([
            "orgs",
            organization_id.as_str(),
            "status_pages",
            subdomain.as_str(),
        ])
    }

    /// All status pages of the organization.
    #[instrument(skip_all, fields(organization_id = %organization_id), name = "status_pages.list")]
    pub async fn list(&self, organization_id: &ResourceId) -> Result<Vec<StatusPage>, Error> {
        let url = self.collection_url(organization_id);
        let request = super::build(self.client.request(Method::GET, url))?;
        self.client.fetch_all(request).await
    }

    /// The status page with `subdomain`.
    #[instrument(
        skip_all,
        fields(organization_id = %organization_id, subdomain = %subdomain),
        name = "status_pages.get"
    )]
    pub async fn get(
        &self,
        organization_id: &ResourceId,
        subdomain: &ResourceId,
    ) -> Result<StatusPage, Error> {
        self.client
            .fetch_one(self.item_url(organization_id, subdomain))
            .await
    }

    /// Create a status page and return it as stored by the service.
    #[instrument(
        skip_all,
        fields(organization_id = %organization_id, subdomain = %status_page.subdomain),
        name = "status_pages.create"
    )]
    pub async fn create(
        &self,
        organization_id: &ResourceId,
        status_page: &StatusPage,
    ) -> Result<StatusPage, Error> {
        self.client
            .send_one(Method::POST, self.collection_url(organization_id), status_page)
            .await
    }

    /// Replace the status page at `subdomain` and return the stored result.
    ///
    /// `status_page.subdomain` may differ from `subdomain` to rename the page.
    #[instrument(
        skip_all,
        fields(organization_id = %organization_id, subdomain = %subdomain),
        name = "status_pages.update"
    )]
    pub async fn update(
        &self,
        organization_id: &ResourceId,
        subdomain: &ResourceId,
        status_page: &StatusPage,
    ) -> Result<StatusPage, Error> {
        self.client
            .send_one(
                Method::PUT,
                self.item_url(organization_id, subdomain),
                status_page,
            )
            .await
    }

    /// Delete the status page at `subdomain`.
    #[instrument(
        skip_all,
        fields(organization_id = %organization_id, subdomain = %subdomain),
        name = "status_pages.delete"
    )]
    pub async fn delete(
        &self,
        organization_id: &ResourceId,
        subdomain: &ResourceId,
    ) -> Result<(), Error> {
        self.client
            .remove(self.item_url(organization_id, subdomain))
            .await
    }
}
