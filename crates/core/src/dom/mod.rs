//! In-memory document tree.
//!
//! [`MemoryDocument`] implements [`Document`] over an owned arena of element
//! nodes. It backs the test suites and the CLI's snapshot reconciliation, and
//! doubles as the reference for what a host adapter must provide.

mod selector;
mod snapshot;

use std::collections::BTreeMap;

use tracing::warn;

pub use snapshot::{ElementSnapshot, PageSnapshot};

use self::selector::{ElementView, Selector};
use crate::document::Document;
use crate::error::Result;

/// Handle to a node of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
	tag: String,
	attributes: BTreeMap<String, String>,
	text: String,
	children: Vec<NodeId>,
	parent: Option<NodeId>,
	attached: bool,
	hidden: bool,
	paused: bool,
}

impl ElementView for Node {
	fn tag(&self) -> &str {
		&self.tag
	}

	fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes.get(name).map(String::as_str)
	}
}

/// Owned element tree with a location and overlay slots.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
	nodes: Vec<Node>,
	root: NodeId,
	location: String,
}

impl MemoryDocument {
	/// Creates a document with an empty `body` root at `location`.
	pub fn new(location: impl Into<String>) -> Self {
		let body = Node {
			tag: "body".to_string(),
			attributes: BTreeMap::new(),
			text: String::new(),
			children: Vec::new(),
			parent: None,
			attached: true,
			hidden: false,
			paused: false,
		};
		Self {
			nodes: vec![body],
			root: NodeId(0),
			location: location.into(),
		}
	}

	pub fn root(&self) -> NodeId {
		self.root
	}

	/// Appends `element` and its subtree under `parent`, returning the new node.
	pub fn append(&mut self, parent: NodeId, element: ElementSnapshot) -> NodeId {
		let ElementSnapshot {
			tag,
			attributes,
			text,
			children,
		} = element;

		let paused = tag.eq_ignore_ascii_case("video") && attributes.contains_key("paused");
		let attached = self.attached_node(parent).is_some();
		let id = NodeId(self.nodes.len());
		self.nodes.push(Node {
			tag: tag.to_ascii_lowercase(),
			attributes,
			text,
			children: Vec::new(),
			parent: Some(parent),
			attached,
			hidden: false,
			paused,
		});
		if let Some(parent_node) = self.nodes.get_mut(parent.0) {
			parent_node.children.push(id);
		}

		for child in children {
			self.append(id, child);
		}
		id
	}

	/// Detaches `node` and its subtree, as a page script removing it would.
	pub fn remove(&mut self, node: NodeId) -> bool {
		if node == self.root || !self.is_attached(&node) {
			return false;
		}
		if let Some(parent) = self.nodes[node.0].parent {
			self.nodes[parent.0].children.retain(|child| *child != node);
		}
		self.mark_detached(node);
		true
	}

	fn mark_detached(&mut self, node: NodeId) {
		let children = std::mem::take(&mut self.nodes[node.0].children);
		self.nodes[node.0].attached = false;
		for child in &children {
			self.mark_detached(*child);
		}
		self.nodes[node.0].children = children;
	}

	/// Changes the location without touching the tree.
	pub fn navigate(&mut self, location: impl Into<String>) {
		self.location = location.into();
	}

	pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) -> bool {
		match self.attached_node_mut(node) {
			Some(n) => {
				n.text = text.into();
				true
			}
			None => false,
		}
	}

	/// Queries with a selector, reporting parse failures.
	pub fn select(&self, scope: Option<NodeId>, selector: &str) -> Result<Vec<NodeId>> {
		let parsed = selector::parse(selector)?;
		let start = scope.unwrap_or(self.root);
		if !self.is_attached(&start) {
			return Ok(Vec::new());
		}

		let mut matches = Vec::new();
		if scope.is_none() && self.matches(start, &parsed) {
			matches.push(start);
		}
		self.collect_matches(start, &parsed, &mut matches);
		Ok(matches)
	}

	/// Whether the first media element is paused.
	pub fn media_paused(&self) -> Option<bool> {
		self.first_media().map(|media| self.nodes[media.0].paused)
	}

	/// Every node currently hidden, in document order.
	pub fn hidden_nodes(&self) -> Vec<NodeId> {
		let mut hidden = Vec::new();
		self.walk(self.root, &mut |id, node| {
			if node.hidden {
				hidden.push(id);
			}
		});
		hidden
	}

	/// Number of mounted elements carrying `id`.
	pub fn count_id(&self, id: &str) -> usize {
		let mut count = 0;
		self.walk(self.root, &mut |_, node| {
			if node.attributes.get("id").is_some_and(|value| value == id) {
				count += 1;
			}
		});
		count
	}

	fn walk(&self, start: NodeId, visit: &mut impl FnMut(NodeId, &Node)) {
		visit(start, &self.nodes[start.0]);
		for child in &self.nodes[start.0].children {
			self.walk(*child, visit);
		}
	}

	fn collect_matches(&self, parent: NodeId, selector: &Selector, out: &mut Vec<NodeId>) {
		for child in &self.nodes[parent.0].children {
			if self.matches(*child, selector) {
				out.push(*child);
			}
			self.collect_matches(*child, selector, out);
		}
	}

	fn matches(&self, node: NodeId, selector: &Selector) -> bool {
		let Some((subject, ancestors)) = selector.compounds.split_last() else {
			return false;
		};
		if !subject.matches(&self.nodes[node.0]) {
			return false;
		}

		let mut cursor = self.nodes[node.0].parent;
		for compound in ancestors.iter().rev() {
			loop {
				let Some(ancestor) = cursor else {
					return false;
				};
				cursor = self.nodes[ancestor.0].parent;
				if compound.matches(&self.nodes[ancestor.0]) {
					break;
				}
			}
		}
		true
	}

	fn find_by_id(&self, id: &str) -> Option<NodeId> {
		let mut found = None;
		self.walk(self.root, &mut |node_id, node| {
			if found.is_none() && node.attributes.get("id").is_some_and(|value| value == id) {
				found = Some(node_id);
			}
		});
		found
	}

	fn first_media(&self) -> Option<NodeId> {
		let mut found = None;
		self.walk(self.root, &mut |node_id, node| {
			if found.is_none() && node.tag == "video" {
				found = Some(node_id);
			}
		});
		found
	}

	fn attached_node(&self, node: NodeId) -> Option<&Node> {
		self.nodes.get(node.0).filter(|n| n.attached)
	}

	fn attached_node_mut(&mut self, node: NodeId) -> Option<&mut Node> {
		self.nodes.get_mut(node.0).filter(|n| n.attached)
	}

	fn render_text(&self, node: NodeId, out: &mut Vec<String>) {
		let data = &self.nodes[node.0];
		let own = data.text.trim();
		if !own.is_empty() {
			out.push(own.to_string());
		}
		for child in &data.children {
			self.render_text(*child, out);
		}
	}
}

impl Document for MemoryDocument {
	type Node = NodeId;

	fn query_all(&self, scope: Option<&NodeId>, selector: &str) -> Vec<NodeId> {
		match self.select(scope.copied(), selector) {
			Ok(nodes) => nodes,
			Err(err) => {
				warn!(target = "focusflow.dom", error = %err, "selector query failed");
				Vec::new()
			}
		}
	}

	fn is_attached(&self, node: &NodeId) -> bool {
		self.attached_node(*node).is_some()
	}

	fn text(&self, node: &NodeId) -> Option<String> {
		self.attached_node(*node)?;
		let mut parts = Vec::new();
		self.render_text(*node, &mut parts);
		Some(parts.join("\n"))
	}

	fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
		self.attached_node(*node)?.attributes.get(name).cloned()
	}

	fn tag_name(&self, node: &NodeId) -> Option<String> {
		self.attached_node(*node).map(|n| n.tag.clone())
	}

	fn set_hidden(&mut self, node: &NodeId, hidden: bool) -> bool {
		match self.attached_node_mut(*node) {
			Some(n) => {
				n.hidden = hidden;
				true
			}
			None => false,
		}
	}

	fn is_hidden(&self, node: &NodeId) -> bool {
		self.attached_node(*node).is_some_and(|n| n.hidden)
	}

	fn location(&self) -> String {
		self.location.clone()
	}

	fn pause_media(&mut self) -> bool {
		match self.first_media() {
			Some(media) => {
				self.nodes[media.0].paused = true;
				true
			}
			None => false,
		}
	}

	fn resume_media(&mut self) -> bool {
		match self.first_media() {
			Some(media) => {
				self.nodes[media.0].paused = false;
				true
			}
			None => false,
		}
	}

	fn has_overlay(&self, id: &str) -> bool {
		self.find_by_id(id).is_some()
	}

	fn overlay_reason(&self, id: &str) -> Option<String> {
		let overlay = self.find_by_id(id)?;
		Some(self.nodes[overlay.0].text.clone())
	}

	fn mount_overlay(&mut self, id: &str, reason: &str) -> bool {
		if self.has_overlay(id) {
			return false;
		}
		let root = self.root;
		self.append(root, ElementSnapshot::new("div").attr("id", id).text(reason));
		true
	}

	fn unmount_overlay(&mut self, id: &str) -> bool {
		match self.find_by_id(id) {
			Some(overlay) => self.remove(overlay),
			None => false,
		}
	}
}
