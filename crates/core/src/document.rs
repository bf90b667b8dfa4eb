//! Host document capability consumed by the engine.

use std::fmt;
use std::hash::Hash;

use serde::Serialize;

/// A live, externally mutated document tree.
///
/// Node handles are opaque to the engine. Every operation on a handle that no
/// longer refers to an attached node must be a harmless no-op: queries return
/// nothing, toggles return `false`.
pub trait Document {
	type Node: Clone + Eq + Hash + fmt::Debug;

	/// All nodes matching `selector` in document order, searched below
	/// `scope` (exclusive) or across the whole document when `scope` is `None`.
	fn query_all(&self, scope: Option<&Self::Node>, selector: &str) -> Vec<Self::Node>;

	/// First node matching `selector`.
	fn query_first(&self, scope: Option<&Self::Node>, selector: &str) -> Option<Self::Node> {
		self.query_all(scope, selector).into_iter().next()
	}

	/// Whether `node` is still part of the document.
	fn is_attached(&self, node: &Self::Node) -> bool;

	/// Rendered text of `node` and its descendants.
	fn text(&self, node: &Self::Node) -> Option<String>;

	fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

	/// Lowercase element name.
	fn tag_name(&self, node: &Self::Node) -> Option<String>;

	/// Hides or shows `node`. Returns `false` when the node is gone.
	fn set_hidden(&mut self, node: &Self::Node, hidden: bool) -> bool;

	fn is_hidden(&self, node: &Self::Node) -> bool;

	/// Current location as path plus query, e.g. `/watch?v=abc`.
	fn location(&self) -> String;

	/// Pauses the active media element. Returns `false` when there is none.
	fn pause_media(&mut self) -> bool;

	/// Resumes the active media element. Returns `false` when there is none.
	fn resume_media(&mut self) -> bool;

	/// Whether an overlay element with `id` is mounted.
	fn has_overlay(&self, id: &str) -> bool;

	/// Reason text of the mounted overlay `id`, if any.
	fn overlay_reason(&self, id: &str) -> Option<String>;

	/// Mounts a blocking overlay identified by `id`. Returns `false` without
	/// touching the document when one with that id is already mounted.
	fn mount_overlay(&mut self, id: &str, reason: &str) -> bool;

	/// Removes the overlay identified by `id`. Returns `false` if absent.
	fn unmount_overlay(&mut self, id: &str) -> bool;
}

/// What kind of page the document currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationContext {
	/// Home, search, channel and other listing pages.
	Feed,
	/// A collection view.
	Playlist,
	/// A single-item detail view.
	Watch,
	/// A single short-form item view.
	Short,
}

impl NavigationContext {
	/// Derives the context from a location; the query string is ignored.
	pub fn from_location(location: &str) -> Self {
		let path = location.split(['?', '#']).next().unwrap_or_default();
		if path.contains("/shorts") {
			NavigationContext::Short
		} else if path.contains("/watch") {
			NavigationContext::Watch
		} else if path.contains("/playlist") {
			NavigationContext::Playlist
		} else {
			NavigationContext::Feed
		}
	}

	/// Single-item views carry a media element and may be blocked by overlay.
	pub fn is_detail_view(&self) -> bool {
		matches!(self, NavigationContext::Watch | NavigationContext::Short)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			NavigationContext::Feed => "feed",
			NavigationContext::Playlist => "playlist",
			NavigationContext::Watch => "watch",
			NavigationContext::Short => "short",
		}
	}
}

impl fmt::Display for NavigationContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
