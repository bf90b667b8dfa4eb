//! CSS selector subset understood by [`MemoryDocument`](super::MemoryDocument).
//!
//! Supports compound selectors made of a tag name, `#id`, `.class`, `[attr]`
//! and `[attr=value]` (value optionally quoted), joined by the descendant
//! combinator. Anything else is rejected.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
	pub(crate) tag: Option<String>,
	pub(crate) id: Option<String>,
	pub(crate) classes: Vec<String>,
	pub(crate) attributes: Vec<(String, Option<String>)>,
}

/// A parsed selector: compounds from outermost ancestor to the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selector {
	pub(crate) compounds: Vec<Compound>,
}

/// Element facts a compound is matched against.
pub(crate) trait ElementView {
	fn tag(&self) -> &str;
	fn attribute(&self, name: &str) -> Option<&str>;
}

impl Compound {
	pub(crate) fn matches(&self, element: &impl ElementView) -> bool {
		if self.tag.as_deref().is_some_and(|tag| !tag.eq_ignore_ascii_case(element.tag())) {
			return false;
		}
		if self.id.as_deref().is_some_and(|id| element.attribute("id") != Some(id)) {
			return false;
		}
		if !self.classes.is_empty() {
			let class_attr = element.attribute("class").unwrap_or_default();
			if !self.classes.iter().all(|class| class_attr.split_whitespace().any(|c| c == class)) {
				return false;
			}
		}
		self.attributes.iter().all(|(name, expected)| match (element.attribute(name), expected) {
			(Some(actual), Some(expected)) => actual == expected,
			(Some(_), None) => true,
			(None, _) => false,
		})
	}
}

pub(crate) fn parse(selector: &str) -> Result<Selector> {
	let invalid = |reason: &str| Error::InvalidSelector {
		selector: selector.to_string(),
		reason: reason.to_string(),
	};

	let mut compounds = Vec::new();
	for token in split_descendants(selector).map_err(|reason| invalid(reason))? {
		compounds.push(parse_compound(&token).map_err(|reason| invalid(reason))?);
	}
	if compounds.is_empty() {
		return Err(invalid("empty selector"));
	}
	Ok(Selector { compounds })
}

fn split_descendants(selector: &str) -> std::result::Result<Vec<String>, &'static str> {
	let mut tokens = Vec::new();
	let mut current = String::new();
	let mut quote: Option<char> = None;
	let mut in_brackets = false;

	for c in selector.chars() {
		match (quote, c) {
			(Some(q), c) if c == q => {
				quote = None;
				current.push(c);
			}
			(Some(_), c) => current.push(c),
			(None, '\'' | '"') if in_brackets => {
				quote = Some(c);
				current.push(c);
			}
			(None, '[') => {
				in_brackets = true;
				current.push(c);
			}
			(None, ']') => {
				in_brackets = false;
				current.push(c);
			}
			(None, c) if c.is_whitespace() && !in_brackets => {
				if !current.is_empty() {
					tokens.push(std::mem::take(&mut current));
				}
			}
			(None, '>' | '+' | '~' | ',') if !in_brackets => return Err("only the descendant combinator is supported"),
			(None, c) => current.push(c),
		}
	}

	if quote.is_some() || in_brackets {
		return Err("unterminated attribute selector");
	}
	if !current.is_empty() {
		tokens.push(current);
	}
	Ok(tokens)
}

fn parse_compound(token: &str) -> std::result::Result<Compound, &'static str> {
	let mut compound = Compound::default();
	let mut rest = token;

	let tag_len = ident_len(rest);
	if tag_len > 0 {
		compound.tag = Some(rest[..tag_len].to_ascii_lowercase());
		rest = &rest[tag_len..];
	} else if let Some(stripped) = rest.strip_prefix('*') {
		rest = stripped;
	}

	while let Some(c) = rest.chars().next() {
		match c {
			'#' => {
				let len = ident_len(&rest[1..]);
				if len == 0 {
					return Err("expected an id after `#`");
				}
				compound.id = Some(rest[1..1 + len].to_string());
				rest = &rest[1 + len..];
			}
			'.' => {
				let len = ident_len(&rest[1..]);
				if len == 0 {
					return Err("expected a class after `.`");
				}
				compound.classes.push(rest[1..1 + len].to_string());
				rest = &rest[1 + len..];
			}
			'[' => {
				let end = rest.find(']').ok_or("unterminated attribute selector")?;
				compound.attributes.push(parse_attribute(&rest[1..end])?);
				rest = &rest[end + 1..];
			}
			_ => return Err("unsupported selector syntax"),
		}
	}

	Ok(compound)
}

fn parse_attribute(body: &str) -> std::result::Result<(String, Option<String>), &'static str> {
	let Some((name, value)) = body.split_once('=') else {
		let name = body.trim();
		if name.is_empty() || ident_len(name) != name.len() {
			return Err("invalid attribute name");
		}
		return Ok((name.to_string(), None));
	};

	let name = name.trim();
	if name.is_empty() || ident_len(name) != name.len() {
		return Err("invalid attribute name");
	}
	let value = value.trim();
	let value = value
		.strip_prefix('\'')
		.and_then(|v| v.strip_suffix('\''))
		.or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
		.unwrap_or(value);
	Ok((name.to_string(), Some(value.to_string())))
}

fn ident_len(s: &str) -> usize {
	s.char_indices()
		.find(|(_, c)| !(c.is_alphanumeric() || *c == '-' || *c == '_'))
		.map(|(i, _)| i)
		.unwrap_or(s.len())
}
