//! Serializable page snapshots.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::MemoryDocument;
use crate::error::Result;

/// One element and its subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSnapshot {
	pub tag: String,
	#[serde(default, rename = "attrs", skip_serializing_if = "BTreeMap::is_empty")]
	pub attributes: BTreeMap<String, String>,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub text: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub children: Vec<ElementSnapshot>,
}

impl ElementSnapshot {
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			..Default::default()
		}
	}

	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.insert(name.into(), value.into());
		self
	}

	pub fn text(mut self, text: impl Into<String>) -> Self {
		self.text = text.into();
		self
	}

	pub fn child(mut self, child: ElementSnapshot) -> Self {
		self.children.push(child);
		self
	}
}

/// A whole page: its location and the children of `body`.
///
/// ```json
/// { "location": "/watch?v=abc", "body": [ { "tag": "video" } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
	#[serde(default = "default_location")]
	pub location: String,
	#[serde(default)]
	pub body: Vec<ElementSnapshot>,
}

fn default_location() -> String {
	"/".to_string()
}

impl PageSnapshot {
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn load(path: &Path) -> Result<Self> {
		let json = std::fs::read_to_string(path)?;
		Self::from_json(&json)
	}

	pub fn into_document(self) -> MemoryDocument {
		let mut document = MemoryDocument::new(self.location);
		let root = document.root();
		for element in self.body {
			document.append(root, element);
		}
		document
	}
}
