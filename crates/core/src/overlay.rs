//! Blocking overlay state machine.
//!
//! ```text
//! Hidden --show(reason)--> Shown(reason)
//! Shown  --dismiss------> Hidden      (view allowed, focus off, navigation)
//! Shown  --allow_once---> Hidden      (also resumes playback)
//! Shown  --show(other)--> Shown       (unchanged: first blocker wins)
//! ```
//!
//! An element already on the page counts as the first blocker: `show` adopts
//! its reason instead of mounting a second one.
//!
//! The document is the source of truth for whether the element is mounted;
//! [`Overlay::sync`] folds external removals back into the state.

use crate::document::Document;

/// Fixed element id; a second mount with this id is a no-op.
pub const OVERLAY_ELEMENT_ID: &str = "focusflow-block-overlay";

pub const DEFAULT_BLOCK_REASON: &str = "Blocked by FocusFlow";

pub const SHORTS_BLOCK_REASON: &str = "Shorts are blocked by FocusFlow";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OverlayState {
	#[default]
	Hidden,
	Shown(String),
}

#[derive(Debug, Default)]
pub struct Overlay {
	state: OverlayState,
}

impl Overlay {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn state(&self) -> &OverlayState {
		&self.state
	}

	pub fn is_shown(&self) -> bool {
		matches!(self.state, OverlayState::Shown(_))
	}

	pub fn reason(&self) -> Option<&str> {
		match &self.state {
			OverlayState::Shown(reason) => Some(reason),
			OverlayState::Hidden => None,
		}
	}

	/// Drops a `Shown` state whose element the page has since removed.
	pub fn sync<D: Document>(&mut self, document: &D) {
		if self.is_shown() && !document.has_overlay(OVERLAY_ELEMENT_ID) {
			self.state = OverlayState::Hidden;
		}
	}

	/// Shows the overlay. Returns `false` if one is already shown or was
	/// adopted from the page.
	pub fn show<D: Document>(&mut self, document: &mut D, reason: &str) -> bool {
		if self.is_shown() {
			return false;
		}
		if document.mount_overlay(OVERLAY_ELEMENT_ID, reason) {
			self.state = OverlayState::Shown(reason.to_string());
			return true;
		}
		let mounted = document.overlay_reason(OVERLAY_ELEMENT_ID).unwrap_or_else(|| reason.to_string());
		self.state = OverlayState::Shown(mounted);
		false
	}

	/// Hides the overlay. Returns `false` if nothing was shown.
	pub fn dismiss<D: Document>(&mut self, document: &mut D) -> bool {
		let removed = document.unmount_overlay(OVERLAY_ELEMENT_ID);
		let was_shown = std::mem::take(&mut self.state) != OverlayState::Hidden;
		was_shown || removed
	}

	/// User override: hides the overlay and resumes playback.
	pub fn allow_once<D: Document>(&mut self, document: &mut D) -> bool {
		if !self.dismiss(document) {
			return false;
		}
		document.resume_media();
		true
	}
}
