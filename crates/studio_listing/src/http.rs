//! HTTP listing source

use crate::error::{Result, TransportError};
use crate::source::ListingSource;
use crate::template::{UrlTemplate, DEFAULT_LISTING_URL};

/// Fetches listing documents over HTTP
#[derive(Debug, Clone)]
pub struct HttpListingSource {
    client: reqwest::Client,
    template: UrlTemplate,
}

impl HttpListingSource {
    pub fn new(template: UrlTemplate) -> Self {
        Self::with_client(reqwest::Client::new(), template)
    }

    pub fn with_client(client: reqwest::Client, template: UrlTemplate) -> Self {
        Self { client, template }
    }

    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }
}

impl Default for HttpListingSource {
    fn default() -> Self {
        Self::new(UrlTemplate::new(DEFAULT_LISTING_URL))
    }
}

impl ListingSource for HttpListingSource {
    async fn fetch_page(&self, container_id: &str, page: u32) -> Result<String> {
        let url = self.template.expand(container_id, page);
        tracing::debug!("Fetching listing page {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))
    }
}
