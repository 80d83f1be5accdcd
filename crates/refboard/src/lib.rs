//! Refboard — fetch a bibliographic collection over HTTP and render it as an APA bibliography.

pub mod fetch;
pub mod format;
pub mod render;
pub mod target;
pub mod types;

pub use fetch::CollectionClient;
pub use format::{ApaFormatter, CitationFormatter};
pub use render::{CollectionRenderer, DEFAULT_ENDPOINT, ENDPOINT_ATTRIBUTE, FAILURE_MESSAGE};
pub use target::{HtmlTarget, RenderTarget};
pub use types::*;
