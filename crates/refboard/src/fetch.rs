//! Single-GET JSON client for the collection endpoint.
//!
//! One request per call — no retry, no backoff, no caching. Anything
//! other than a 2xx with a decodable body is an error for the caller
//! to fold.

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::types::{Collection, RenderError};

/// HTTP client for collection reads.
#[derive(Debug, Clone)]
pub struct CollectionClient {
    client: reqwest::Client,
    /// Base origin for resolving relative endpoints, when one is known.
    base: Option<Url>,
}

impl CollectionClient {
    /// Create a client with the given request timeout.
    pub fn new(timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .unwrap_or_default();

        Self { client, base: None }
    }

    /// Set the base origin used to resolve relative endpoints such as
    /// the default `/collection` path.
    pub fn with_base(mut self, base: Url) -> Self {
        self.base = Some(base);
        self
    }

    /// Resolve an endpoint string into an absolute URL.
    ///
    /// Absolute endpoints pass through; relative ones are joined onto
    /// the configured base origin. A relative endpoint with no base is
    /// an error.
    pub fn resolve(&self, endpoint: &str) -> Result<Url, RenderError> {
        match Url::parse(endpoint) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base {
                Some(base) => base
                    .join(endpoint)
                    .map_err(|e| RenderError::Endpoint(e.to_string())),
                None => Err(RenderError::Endpoint(format!(
                    "relative endpoint {endpoint:?} with no base origin configured"
                ))),
            },
            Err(e) => Err(RenderError::Endpoint(e.to_string())),
        }
    }

    /// Fetch and decode the collection behind `endpoint`.
    pub async fn fetch(&self, endpoint: &str) -> Result<Collection, RenderError> {
        let url = self.resolve(endpoint)?;

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!(url = %url, bytes = body.len(), "collection response received");

        serde_json::from_str(&body).map_err(|e| RenderError::Decode(e.to_string()))
    }
}
