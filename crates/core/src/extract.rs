//! Title/channel signal extraction.
//!
//! Each field is located by an ordered list of [`Strategy`] values; the first
//! one producing non-blank text wins. A listing with no title falls back to
//! its own text, capped at [`FALLBACK_TEXT_CHARS`]. Nothing here fails: a
//! strategy that finds nothing just hands over to the next one.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::document::Document;
use crate::selectors::SelectorSet;

/// Cap on the fallback text taken from a listing wrapper.
pub const FALLBACK_TEXT_CHARS: usize = 200;

static VIDEO_ID_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?:[?&]v=|/shorts/)([A-Za-z0-9_-]+)").expect("VIDEO_ID_RE should compile"));

/// How to read one text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
	/// Rendered text of the first match of a selector.
	Text(String),
	/// Rendered text of the first match, else the named attribute.
	TextOrAttribute { selector: String, attribute: String },
}

impl Strategy {
	pub fn text(selector: impl Into<String>) -> Self {
		Strategy::Text(selector.into())
	}

	pub fn text_or_attribute(selector: impl Into<String>, attribute: impl Into<String>) -> Self {
		Strategy::TextOrAttribute {
			selector: selector.into(),
			attribute: attribute.into(),
		}
	}

	fn selector(&self) -> &str {
		match self {
			Strategy::Text(selector) | Strategy::TextOrAttribute { selector, .. } => selector,
		}
	}

	/// Runs the strategy below `scope`, returning non-blank text.
	pub fn resolve<D: Document>(&self, document: &D, scope: Option<&D::Node>) -> Option<String> {
		let node = document.query_first(scope, self.selector())?;
		let text = document.text(&node).filter(|t| !t.trim().is_empty());
		match self {
			Strategy::Text(_) => text,
			Strategy::TextOrAttribute { attribute, .. } => {
				text.or_else(|| document.attribute(&node, attribute).filter(|v| !v.trim().is_empty()))
			}
		}
	}
}

/// Raw text signals for one item or view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signals {
	pub title: String,
	pub channel: String,
}

/// First non-blank result of `strategies`.
pub fn first_text<D: Document>(document: &D, scope: Option<&D::Node>, strategies: &[Strategy]) -> Option<String> {
	strategies.iter().find_map(|strategy| strategy.resolve(document, scope))
}

/// Extracts signals from a listing item.
pub fn extract_item<D: Document>(document: &D, item: &D::Node, selectors: &SelectorSet) -> Signals {
	let title = first_text(document, Some(item), &selectors.item_title)
		.or_else(|| document.text(item).map(|text| truncate_chars(&text, FALLBACK_TEXT_CHARS)))
		.unwrap_or_default();
	let channel = first_text(document, Some(item), &selectors.item_channel).unwrap_or_default();
	Signals { title, channel }
}

/// Extracts signals from the single-item detail view.
pub fn extract_detail<D: Document>(document: &D, selectors: &SelectorSet) -> Signals {
	Signals {
		title: first_text(document, None, &selectors.detail_title).unwrap_or_default(),
		channel: first_text(document, None, &selectors.detail_channel).unwrap_or_default(),
	}
}

/// The `href` of an item's thumbnail link.
pub fn item_link<D: Document>(document: &D, item: &D::Node, selectors: &SelectorSet) -> Option<String> {
	let anchor = document.query_first(Some(item), &selectors.item_link)?;
	document.attribute(&anchor, "href")
}

/// Whether a link points at short-form content.
pub fn is_short_form_link(link: &str) -> bool {
	link.contains("/shorts/")
}

/// Video identifier from a `watch?v=` or `/shorts/` link.
pub fn video_id(link: &str) -> Option<&str> {
	VIDEO_ID_RE.captures(link).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

fn truncate_chars(text: &str, max: usize) -> String {
	match text.char_indices().nth(max) {
		Some((end, _)) => text[..end].to_string(),
		None => text.to_string(),
	}
}
