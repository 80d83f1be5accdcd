//! Citation formatting: one bibjson record in, one HTML bibliography
//! fragment out.
//!
//! The record shape is owned by whoever produced it; this module reads
//! the fields it understands and ignores the rest. Both CSL-JSON people
//! (`family`/`given`, `issued.date-parts`) and bibjson people
//! (`lastname`/`firstname`/`name`, `year`) are accepted, since the
//! collection endpoint emits the latter while most reference managers
//! export the former.

use serde_json::Value;

use crate::types::RenderError;

/// Formats a single citation record into an HTML fragment.
pub trait CitationFormatter {
    fn format(&self, bibjson: &Value) -> Result<String, RenderError>;
}

/// APA-style bibliography formatter.
///
/// Produces `<div class="csl-entry">Authors (Year). Title. Venue.</div>`
/// fragments with all record text HTML-escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApaFormatter;

impl CitationFormatter for ApaFormatter {
    fn format(&self, bibjson: &Value) -> Result<String, RenderError> {
        let title = bibjson
            .get("title")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RenderError::Format("item has no title".into()))?;

        let mut entry = String::new();

        let authors = author_list(&author_names(bibjson));
        if !authors.is_empty() {
            entry.push_str(&escape_html(&authors));
            entry.push(' ');
        }

        match year(bibjson) {
            Some(y) => {
                entry.push('(');
                entry.push_str(&escape_html(&y));
                entry.push_str("). ");
            }
            None => entry.push_str("(n.d.). "),
        }

        entry.push_str(&escape_html(title));
        if !title.ends_with(['.', '!', '?']) {
            entry.push('.');
        }

        if let Some(venue) = venue(bibjson) {
            entry.push_str(" <i>");
            entry.push_str(&escape_html(&venue.name));
            entry.push_str("</i>");
            if let Some(volume) = venue.volume {
                entry.push_str(", ");
                entry.push_str(&escape_html(&volume));
            }
            if let Some(pages) = venue.pages {
                entry.push_str(", ");
                entry.push_str(&escape_html(&pages));
            }
            entry.push('.');
        } else if let Some(publisher) = scalar(bibjson, "publisher") {
            entry.push(' ');
            entry.push_str(&escape_html(&publisher));
            entry.push('.');
        }

        Ok(format!(r#"<div class="csl-entry">{entry}</div>"#))
    }
}

struct Venue {
    name: String,
    volume: Option<String>,
    pages: Option<String>,
}

/// Extract "Family, I. I." names from the record's `author` array.
fn author_names(bibjson: &Value) -> Vec<String> {
    bibjson
        .get("author")
        .and_then(Value::as_array)
        .map(|authors| authors.iter().filter_map(author_name).collect())
        .unwrap_or_default()
}

fn author_name(entry: &Value) -> Option<String> {
    if let Some(family) = entry.get("family").and_then(Value::as_str) {
        return Some(join_name(
            family,
            entry.get("given").and_then(Value::as_str),
        ));
    }
    if let Some(lastname) = entry.get("lastname").and_then(Value::as_str) {
        return Some(join_name(
            lastname,
            entry.get("firstname").and_then(Value::as_str),
        ));
    }
    // Pre-joined "Family, Given" form.
    entry
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn join_name(family: &str, given: Option<&str>) -> String {
    let initials = given.map(initials).unwrap_or_default();
    if initials.is_empty() {
        family.to_string()
    } else {
        format!("{family}, {initials}")
    }
}

/// "Jane Q." -> "J. Q."
fn initials(given: &str) -> String {
    given
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .map(|c| format!("{}.", c.to_uppercase()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// APA author list: "A.", "A., & B.", "A., B., & C.".
fn author_list(names: &[String]) -> String {
    match names.len() {
        0 => String::new(),
        1 => names[0].clone(),
        n => format!("{}, & {}", names[..n - 1].join(", "), names[n - 1]),
    }
}

fn year(bibjson: &Value) -> Option<String> {
    // CSL-JSON: {"issued": {"date-parts": [[2020, ...]]}}
    if let Some(part) = bibjson.pointer("/issued/date-parts/0/0") {
        if let Some(n) = part.as_i64() {
            return Some(n.to_string());
        }
        if let Some(s) = part.as_str() {
            return Some(s.to_string());
        }
    }
    scalar(bibjson, "year")
}

fn venue(bibjson: &Value) -> Option<Venue> {
    match bibjson.get("journal") {
        // Flat bibjson: journal is the name, volume/pages are siblings.
        Some(Value::String(name)) => Some(Venue {
            name: name.clone(),
            volume: scalar(bibjson, "volume"),
            pages: scalar(bibjson, "pages"),
        }),
        // Nested bibjson: {"journal": {"name": ..., "volume": ..., "pages": ...}}
        Some(Value::Object(journal)) => {
            let name = journal.get("name").and_then(Value::as_str)?;
            Some(Venue {
                name: name.to_string(),
                volume: scalar_in(journal, "volume").or_else(|| scalar(bibjson, "volume")),
                pages: scalar_in(journal, "pages").or_else(|| scalar(bibjson, "pages")),
            })
        }
        // CSL-JSON fallback.
        _ => scalar(bibjson, "container-title").map(|name| Venue {
            name,
            volume: scalar(bibjson, "volume"),
            pages: scalar(bibjson, "pages"),
        }),
    }
}

fn scalar(value: &Value, key: &str) -> Option<String> {
    match value.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn scalar_in(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Minimal HTML text/attribute escaping.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
