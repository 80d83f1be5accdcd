//! The render cycle: fetch the collection, format every item, replace
//! the target's content.
//!
//! `render` is fire-and-forget: it never returns an error. Every
//! failure — unreachable endpoint, bad status, undecodable body, or a
//! record the formatter rejects — collapses into one fixed error banner
//! that replaces the target's content. The underlying error is traced,
//! nothing more.
//!
//! Known race, documented rather than engineered away: two concurrent
//! cycles writing to one shared target are last-writer-wins. The `&mut`
//! borrow rules this out unless the caller opts into shared mutability.

use tracing::{debug, warn};

use crate::fetch::CollectionClient;
use crate::format::{ApaFormatter, CitationFormatter};
use crate::target::RenderTarget;
use crate::types::RenderError;

/// Default collection path when the target carries no endpoint.
pub const DEFAULT_ENDPOINT: &str = "/collection";

/// Target attribute that configures the endpoint.
pub const ENDPOINT_ATTRIBUTE: &str = "data-endpoint";

/// Fixed user-facing message shown on any failure.
pub const FAILURE_MESSAGE: &str = "Failed to retrieve collection items...";

/// Drives render cycles against a collection endpoint.
#[derive(Debug, Clone)]
pub struct CollectionRenderer<F = ApaFormatter> {
    client: CollectionClient,
    formatter: F,
}

impl CollectionRenderer<ApaFormatter> {
    /// Renderer with the default APA formatter.
    pub fn new(client: CollectionClient) -> Self {
        Self::with_formatter(client, ApaFormatter)
    }
}

impl<F: CitationFormatter> CollectionRenderer<F> {
    /// Renderer with a caller-supplied citation formatter.
    pub fn with_formatter(client: CollectionClient, formatter: F) -> Self {
        Self { client, formatter }
    }

    /// Run one render cycle: fetch `endpoint`, format each item in
    /// order, then replace `target`'s content with either the formatted
    /// fragments or exactly one error banner.
    ///
    /// The outcome is observable only through the target's content.
    pub async fn render(&self, endpoint: &str, target: &mut impl RenderTarget) {
        debug!(endpoint, "render cycle: requesting");
        match self.fragments(endpoint).await {
            Ok(fragments) => {
                debug!(count = fragments.len(), "render cycle: rendering");
                target.clear();
                for fragment in &fragments {
                    target.append(fragment);
                }
                debug!("render cycle: rendered");
            }
            Err(err) => {
                warn!(error = %err, endpoint, "render cycle: failing");
                target.clear();
                target.append(&error_banner());
            }
        }
    }

    /// Run one render cycle with the endpoint read from the target's
    /// `data-endpoint` attribute, falling back to `/collection`.
    pub async fn render_configured(&self, target: &mut impl RenderTarget) {
        let endpoint = target
            .read_attribute(ENDPOINT_ATTRIBUTE)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        self.render(&endpoint, target).await;
    }

    /// Fetch and format without touching the target. Every fragment
    /// must format cleanly before anything is written, so a formatter
    /// failure on one item fails the whole cycle.
    async fn fragments(&self, endpoint: &str) -> Result<Vec<String>, RenderError> {
        let collection = self.client.fetch(endpoint).await?;
        collection
            .items
            .iter()
            .map(|item| self.formatter.format(&item.bibjson))
            .collect()
    }
}

/// The single error notice that replaces the target's content on failure.
pub fn error_banner() -> String {
    format!(r#"<div class="alert alert-danger">{FAILURE_MESSAGE}</div>"#)
}
