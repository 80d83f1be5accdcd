//! Render targets: the container element whose content a render cycle
//! replaces.

use scraper::{ElementRef, Html};

use crate::format::escape_html;

/// The container a render cycle writes into. One target per cycle;
/// prior content is fully discarded, never merged.
pub trait RenderTarget {
    /// Drop all current content.
    fn clear(&mut self);

    /// Append one already-formatted HTML fragment.
    fn append(&mut self, fragment: &str);

    /// Read an attribute of the container itself (e.g. `data-endpoint`).
    fn read_attribute(&self, name: &str) -> Option<String>;
}

/// In-memory HTML container element.
#[derive(Debug, Clone)]
pub struct HtmlTarget {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<String>,
}

impl HtmlTarget {
    /// Create an empty container with the given tag.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute to the container.
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Build a target from the first element of an HTML snippet,
    /// carrying its tag, attributes, and existing inner content.
    ///
    /// This is how `<div id="refs" data-endpoint="...">` on a page
    /// becomes a configured target. Returns `None` when the snippet
    /// contains no element.
    pub fn from_html(snippet: &str) -> Option<Self> {
        let fragment = Html::parse_fragment(snippet);
        let element = fragment
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .next()?;

        let inner = element.inner_html();
        let children = if inner.trim().is_empty() {
            Vec::new()
        } else {
            vec![inner]
        };

        Some(Self {
            tag: element.value().name().to_string(),
            attributes: element
                .value()
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children,
        })
    }

    /// The fragments currently held, in append order.
    pub fn children(&self) -> &[String] {
        &self.children
    }

    /// Serialize the container and its content back to HTML.
    pub fn to_html(&self) -> String {
        let mut attrs = String::new();
        for (name, value) in &self.attributes {
            attrs.push_str(&format!(r#" {}="{}""#, name, escape_html(value)));
        }
        format!("<{0}{1}>{2}</{0}>", self.tag, attrs, self.children.concat())
    }
}

impl RenderTarget for HtmlTarget {
    fn clear(&mut self) {
        self.children.clear();
    }

    fn append(&mut self, fragment: &str) {
        self.children.push(fragment.to_string());
    }

    fn read_attribute(&self, name: &str) -> Option<String> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_html_reads_attributes() {
        let target =
            HtmlTarget::from_html(r#"<div id="refs" data-endpoint="https://refs.example.org/collection"></div>"#)
                .unwrap();
        assert_eq!(target.read_attribute("id").as_deref(), Some("refs"));
        assert_eq!(
            target.read_attribute("data-endpoint").as_deref(),
            Some("https://refs.example.org/collection")
        );
        assert_eq!(target.read_attribute("class"), None);
        assert!(target.children().is_empty());
    }

    #[test]
    fn test_from_html_keeps_prior_content() {
        let target = HtmlTarget::from_html(r#"<div id="refs"><p>loading…</p></div>"#).unwrap();
        assert_eq!(target.children().len(), 1);
        assert!(target.children()[0].contains("loading"));
    }

    #[test]
    fn test_from_html_without_element() {
        assert!(HtmlTarget::from_html("just text").is_none());
    }

    #[test]
    fn test_clear_then_append_replaces() {
        let mut target = HtmlTarget::new("div").with_attribute("id", "refs");
        target.append("<p>old</p>");
        target.clear();
        target.append("<p>new</p>");
        assert_eq!(target.children(), ["<p>new</p>"]);
        assert_eq!(target.to_html(), r#"<div id="refs"><p>new</p></div>"#);
    }

    #[test]
    fn test_to_html_escapes_attribute_values() {
        let target = HtmlTarget::new("div").with_attribute("data-label", r#"a "quoted" & odd"#);
        assert!(target.to_html().contains("&quot;quoted&quot; &amp; odd"));
    }
}
