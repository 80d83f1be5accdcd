//! Core data types for bibliographic collections.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One render cycle's worth of bibliographic items, as served by the
/// collection endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub items: Vec<CollectionItem>,
}

/// A single library item. Only `bibjson` is consumed here; the endpoint
/// also sends key, title, authors, attachments and the like, which pass
/// through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionItem {
    pub bibjson: Value,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Collection {
    /// Number of items in the collection.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the collection has no items. An empty collection is a
    /// valid response, not an error.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Errors that can occur while fetching or formatting a collection.
///
/// The renderer folds every variant into the single user-visible error
/// banner; callers only see these through [`CollectionClient`] and
/// [`CitationFormatter`] directly.
///
/// [`CollectionClient`]: crate::fetch::CollectionClient
/// [`CitationFormatter`]: crate::format::CitationFormatter
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Undecodable collection body: {0}")]
    Decode(String),

    #[error("Citation format error: {0}")]
    Format(String),

    #[error("Bad endpoint: {0}")]
    Endpoint(String),
}
