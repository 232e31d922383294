//! Listing pages over `window.fetch`

use studio_listing::{ListingSource, Result, TransportError, UrlTemplate};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Fetches listing documents with the browser's fetch API
#[derive(Debug, Clone)]
pub struct FetchListingSource {
    template: UrlTemplate,
}

impl FetchListingSource {
    pub fn new(template: UrlTemplate) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }
}

fn network_error(value: JsValue) -> TransportError {
    TransportError::Network(format!("{value:?}"))
}

impl ListingSource for FetchListingSource {
    async fn fetch_page(&self, container_id: &str, page: u32) -> Result<String> {
        let url = self.template.expand(container_id, page);
        tracing::debug!("Fetching listing page {}", url);

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);
        let request = Request::new_with_str_and_init(&url, &opts).map_err(network_error)?;

        let window = web_sys::window()
            .ok_or_else(|| TransportError::Network("no global window".to_string()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network_error)?
            .dyn_into()
            .map_err(network_error)?;

        if !response.ok() {
            return Err(TransportError::Status(response.status()));
        }

        JsFuture::from(response.text().map_err(network_error)?)
            .await
            .map_err(network_error)?
            .as_string()
            .ok_or_else(|| TransportError::Network("response body is not text".to_string()))
    }
}
