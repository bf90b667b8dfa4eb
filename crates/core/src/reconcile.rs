//! Page reconciliation.
//!
//! One [`Reconciler`] owns all engine-side page state: the side table of
//! nodes it has hidden and the blocking overlay. A pass re-derives every
//! decision from the current configuration and tree; nothing is cached
//! between passes except which nodes this engine hid.
//!
//! After a pass, every node the pass looked at is either visible and unmarked
//! or hidden and marked. Nodes hidden by anyone else are never touched.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::{Configuration, EffectiveLists};
use crate::document::{Document, NavigationContext};
use crate::extract::{extract_detail, extract_item, is_short_form_link, item_link, video_id};
use crate::overlay::{DEFAULT_BLOCK_REASON, Overlay, SHORTS_BLOCK_REASON};
use crate::selectors::{ListingCategory, SelectorSet};

/// Shelf headers that are always suppressed.
const SUPPRESSED_SHELVES: &[&str] = &["shorts", "trending"];

/// Shelf headers suppressed only while short-form blocking is on.
const SHORTS_ONLY_SHELVES: &[&str] = &["popular"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PassMode {
	/// Full classification pass.
	Filter,
	/// Focus mode off: everything this engine hid was restored.
	Restore,
}

/// What happened to one listing or playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOutcome {
	pub category: ListingCategory,
	pub title: String,
	pub channel: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub video_id: Option<String>,
	pub rule: &'static str,
	pub hidden: bool,
}

/// What happened to the single-item view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum DetailOutcome {
	NotDetailView,
	/// Short-form view blocked without consulting the classifier.
	ShortsBlocked,
	Blocked { rule: &'static str },
	Allowed { rule: &'static str },
	/// The user let this location through.
	AllowedOnce,
}

/// Summary of one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassReport {
	pub mode: PassMode,
	pub context: NavigationContext,
	/// Unique listing and playlist nodes examined.
	pub scanned: usize,
	/// Listing and playlist nodes left hidden.
	pub hidden: usize,
	/// Marked nodes made visible again.
	pub restored: usize,
	pub shelves_hidden: usize,
	pub items: Vec<ItemOutcome>,
	pub detail: DetailOutcome,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub overlay: Option<String>,
}

impl PassReport {
	fn new(mode: PassMode, context: NavigationContext) -> Self {
		Self {
			mode,
			context,
			scanned: 0,
			hidden: 0,
			restored: 0,
			shelves_hidden: 0,
			items: Vec::new(),
			detail: DetailOutcome::NotDetailView,
			overlay: None,
		}
	}
}

/// Owns hidden markers and the overlay for one document.
pub struct Reconciler<N> {
	selectors: SelectorSet,
	hidden: HashSet<N>,
	overlay: Overlay,
	allowed_once: Option<String>,
}

impl<N: fmt::Debug> fmt::Debug for Reconciler<N> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Reconciler")
			.field("hidden", &self.hidden.len())
			.field("overlay", self.overlay.state())
			.field("allowed_once", &self.allowed_once)
			.finish()
	}
}

impl<N> Reconciler<N>
where
	N: Clone + Eq + Hash + fmt::Debug,
{
	pub fn new(selectors: SelectorSet) -> Self {
		Self {
			selectors,
			hidden: HashSet::new(),
			overlay: Overlay::new(),
			allowed_once: None,
		}
	}

	pub fn overlay(&self) -> &Overlay {
		&self.overlay
	}

	/// Whether this engine currently holds `node` hidden.
	pub fn is_marked(&self, node: &N) -> bool {
		self.hidden.contains(node)
	}

	pub fn marked_count(&self) -> usize {
		self.hidden.len()
	}

	/// Runs one pass against `document` with a single configuration snapshot.
	pub fn apply<D>(&mut self, config: &Configuration, document: &mut D) -> PassReport
	where
		D: Document<Node = N>,
	{
		self.overlay.sync(document);
		self.hidden.retain(|node| document.is_attached(node));

		if !config.focus_mode_enabled {
			return self.restore_all(document);
		}

		let location = document.location();
		let context = NavigationContext::from_location(&location);
		if self.allowed_once.as_deref().is_some_and(|allowed| allowed != location) {
			self.allowed_once = None;
		}

		let lists = config.effective_lists();
		let mut report = PassReport::new(PassMode::Filter, context);

		for (node, category) in self.enumerate(document) {
			let outcome = self.reconcile_item(document, &node, category, config, &lists, &mut report);
			report.items.push(outcome);
		}

		self.reconcile_shelves(document, config, &mut report);

		if context == NavigationContext::Playlist {
			for node in document.query_all(None, &self.selectors.playlist_entries) {
				let outcome = self.reconcile_entry(document, &node, ListingCategory::PlaylistEntry, &lists, &mut report);
				report.items.push(outcome);
			}
		}

		report.detail = if context.is_detail_view() {
			self.reconcile_detail(document, context, config, &lists)
		} else {
			// Leaving a detail view takes its overlay with it.
			self.overlay.dismiss(document);
			DetailOutcome::NotDetailView
		};

		report.scanned = report.items.len();
		report.hidden = report.items.iter().filter(|item| item.hidden).count();
		report.overlay = self.overlay.reason().map(ToString::to_string);

		debug!(
			target = "focusflow.reconcile",
			context = %context,
			scanned = report.scanned,
			hidden = report.hidden,
			restored = report.restored,
			shelves_hidden = report.shelves_hidden,
			detail = ?report.detail,
			"pass complete"
		);
		report
	}

	/// Makes every node this engine hid visible again and removes the overlay.
	///
	/// Does no classification work.
	pub fn restore_all<D>(&mut self, document: &mut D) -> PassReport
	where
		D: Document<Node = N>,
	{
		let context = NavigationContext::from_location(&document.location());
		let mut report = PassReport::new(PassMode::Restore, context);

		for node in self.hidden.drain() {
			if document.set_hidden(&node, false) {
				report.restored += 1;
			}
		}
		self.overlay.dismiss(document);
		self.allowed_once = None;

		debug!(target = "focusflow.reconcile", restored = report.restored, "restored page");
		report
	}

	/// The user's "allow once" on the overlay: lets the current location play
	/// until the page navigates elsewhere.
	pub fn allow_once<D>(&mut self, document: &mut D) -> bool
	where
		D: Document<Node = N>,
	{
		if !self.overlay.allow_once(document) {
			return false;
		}
		let location = document.location();
		debug!(target = "focusflow.reconcile", location = %location, "allowed once");
		self.allowed_once = Some(location);
		true
	}

	fn enumerate<D>(&self, document: &D) -> Vec<(N, ListingCategory)>
	where
		D: Document<Node = N>,
	{
		let mut seen = HashSet::new();
		let mut items = Vec::new();
		for (category, selector) in &self.selectors.listings {
			for node in document.query_all(None, selector) {
				if seen.insert(node.clone()) {
					items.push((node, *category));
				}
			}
		}
		items
	}

	fn reconcile_item<D>(
		&mut self,
		document: &mut D,
		node: &N,
		category: ListingCategory,
		config: &Configuration,
		lists: &EffectiveLists<'_>,
		report: &mut PassReport,
	) -> ItemOutcome
	where
		D: Document<Node = N>,
	{
		if config.block_shorts {
			let link = item_link(document, node, &self.selectors);
			let structural = category.is_short_form() || document.tag_name(node).is_some_and(|tag| tag.contains("reel"));
			if structural || link.as_deref().is_some_and(is_short_form_link) {
				let hidden = self.hide(document, node);
				trace!(target = "focusflow.reconcile", node = ?node, "short-form listing hidden");
				return ItemOutcome {
					category,
					title: String::new(),
					channel: String::new(),
					video_id: link.as_deref().and_then(video_id).map(ToString::to_string),
					rule: "short-form",
					hidden,
				};
			}
		}

		self.reconcile_entry(document, node, category, lists, report)
	}

	fn reconcile_entry<D>(
		&mut self,
		document: &mut D,
		node: &N,
		category: ListingCategory,
		lists: &EffectiveLists<'_>,
		report: &mut PassReport,
	) -> ItemOutcome
	where
		D: Document<Node = N>,
	{
		let signals = extract_item(document, node, &self.selectors);
		let verdict = lists.explain(&signals.title, &signals.channel);
		let link = item_link(document, node, &self.selectors);

		let hidden = if verdict.is_educational() {
			if self.restore(document, node) {
				report.restored += 1;
			}
			false
		} else {
			self.hide(document, node)
		};

		trace!(
			target = "focusflow.reconcile",
			title = %signals.title,
			channel = %signals.channel,
			verdict = %verdict,
			hidden,
			"classified entry"
		);

		ItemOutcome {
			category,
			video_id: link.as_deref().and_then(video_id).map(ToString::to_string),
			rule: verdict.rule(),
			title: signals.title,
			channel: signals.channel,
			hidden,
		}
	}

	fn reconcile_shelves<D>(&mut self, document: &mut D, config: &Configuration, report: &mut PassReport)
	where
		D: Document<Node = N>,
	{
		for shelf in document.query_all(None, &self.selectors.shelves) {
			let header = document
				.query_first(Some(&shelf), &self.selectors.shelf_header)
				.and_then(|node| document.text(&node))
				.unwrap_or_default()
				.to_lowercase();

			if shelf_is_suppressed(&header, config.block_shorts) {
				if self.hide(document, &shelf) {
					report.shelves_hidden += 1;
				}
			} else if self.restore(document, &shelf) {
				report.restored += 1;
			}
		}
	}

	fn reconcile_detail<D>(&mut self, document: &mut D, context: NavigationContext, config: &Configuration, lists: &EffectiveLists<'_>) -> DetailOutcome
	where
		D: Document<Node = N>,
	{
		if self.allowed_once.is_some() {
			return DetailOutcome::AllowedOnce;
		}

		if config.block_shorts && context == NavigationContext::Short {
			document.pause_media();
			self.overlay.show(document, SHORTS_BLOCK_REASON);
			return DetailOutcome::ShortsBlocked;
		}

		let signals = extract_detail(document, &self.selectors);
		let verdict = lists.explain(&signals.title, &signals.channel);
		trace!(target = "focusflow.reconcile", title = %signals.title, channel = %signals.channel, verdict = %verdict, "classified detail view");

		if verdict.is_educational() {
			self.overlay.dismiss(document);
			DetailOutcome::Allowed { rule: verdict.rule() }
		} else {
			document.pause_media();
			self.overlay.show(document, DEFAULT_BLOCK_REASON);
			DetailOutcome::Blocked { rule: verdict.rule() }
		}
	}

	/// Hides and marks `node`. Returns `false` if the node is gone.
	fn hide<D>(&mut self, document: &mut D, node: &N) -> bool
	where
		D: Document<Node = N>,
	{
		if document.set_hidden(node, true) {
			self.hidden.insert(node.clone());
			true
		} else {
			self.hidden.remove(node);
			false
		}
	}

	/// Shows `node` if this engine hid it. Returns whether it did.
	fn restore<D>(&mut self, document: &mut D, node: &N) -> bool
	where
		D: Document<Node = N>,
	{
		self.hidden.remove(node) && document.set_hidden(node, false)
	}
}

fn shelf_is_suppressed(header: &str, block_shorts: bool) -> bool {
	SUPPRESSED_SHELVES.iter().any(|term| header.contains(term)) || (block_shorts && SHORTS_ONLY_SHELVES.iter().any(|term| header.contains(term)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::{ElementSnapshot, MemoryDocument, NodeId};
	use crate::overlay::OVERLAY_ELEMENT_ID;

	fn focus(block_shorts: bool) -> Configuration {
		Configuration {
			focus_mode_enabled: true,
			block_shorts,
			..Default::default()
		}
	}

	fn listing(tag: &str, title: &str, channel: &str, href: &str) -> ElementSnapshot {
		ElementSnapshot::new(tag)
			.child(ElementSnapshot::new("a").attr("id", "thumbnail").attr("href", href))
			.child(ElementSnapshot::new("a").attr("id", "video-title").text(title))
			.child(ElementSnapshot::new("ytd-channel-name").child(ElementSnapshot::new("a").text(channel)))
	}

	fn shelf(header: &str) -> ElementSnapshot {
		ElementSnapshot::new("ytd-rich-section-renderer")
			.child(ElementSnapshot::new("span").attr("id", "title").text(header))
			.child(listing("ytd-rich-item-renderer", "Vector calculus lecture 3", "MIT OpenCourseWare", "/watch?v=s1"))
	}

	fn watch_page(location: &str, title: &str, channel: &str) -> MemoryDocument {
		let mut doc = MemoryDocument::new(location);
		let root = doc.root();
		doc.append(root, ElementSnapshot::new("video"));
		doc.append(root, ElementSnapshot::new("h1").attr("class", "title").child(ElementSnapshot::new("yt-formatted-string").text(title)));
		doc.append(root, ElementSnapshot::new("ytd-channel-name").child(ElementSnapshot::new("a").text(channel)));
		doc
	}

	struct Feed {
		doc: MemoryDocument,
		lecture: NodeId,
		prank: NodeId,
		short: NodeId,
	}

	fn feed() -> Feed {
		let mut doc = MemoryDocument::new("/");
		let root = doc.root();
		let lecture = doc.append(root, listing("ytd-rich-item-renderer", "Linear algebra lecture 1", "Prof. Ada", "/watch?v=lec1"));
		let prank = doc.append(root, listing("ytd-video-renderer", "Epic prank compilation", "Laughs", "/watch?v=prk1"));
		let short = doc.append(root, listing("ytd-rich-item-renderer", "Physics tutorial in 60s", "Quick Science", "/shorts/sh1"));
		Feed { doc, lecture, prank, short }
	}

	fn reconciler() -> Reconciler<NodeId> {
		Reconciler::new(SelectorSet::youtube())
	}

	#[test]
	fn hides_non_educational_and_keeps_educational() {
		let Feed { mut doc, lecture, prank, .. } = feed();
		let mut rec = reconciler();

		let report = rec.apply(&focus(false), &mut doc);

		assert_eq!(report.mode, PassMode::Filter);
		assert!(!doc.is_hidden(&lecture));
		assert!(!rec.is_marked(&lecture));
		assert!(doc.is_hidden(&prank));
		assert!(rec.is_marked(&prank));
		assert_eq!(report.scanned, 3);
		assert_eq!(report.hidden, 1);
	}

	#[test]
	fn reports_deciding_rules() {
		let Feed { mut doc, .. } = feed();
		let report = reconciler().apply(&focus(false), &mut doc);
		let rules: Vec<_> = report.items.iter().map(|item| item.rule).collect();
		assert_eq!(rules, vec!["allow-keyword", "allow-keyword", "blacklisted"]);
		assert_eq!(report.items[0].video_id.as_deref(), Some("lec1"));
	}

	#[test]
	fn second_pass_yields_same_partition() {
		let Feed { mut doc, .. } = feed();
		let mut rec = reconciler();

		rec.apply(&focus(true), &mut doc);
		let first = doc.hidden_nodes();
		let second_report = rec.apply(&focus(true), &mut doc);

		assert_eq!(doc.hidden_nodes(), first);
		assert_eq!(second_report.restored, 0);
		assert_eq!(rec.marked_count(), first.len());
	}

	#[test]
	fn block_shorts_hides_educational_short_form_links() {
		let Feed { mut doc, short, .. } = feed();
		let mut rec = reconciler();

		rec.apply(&focus(false), &mut doc);
		assert!(!doc.is_hidden(&short));

		let report = rec.apply(&focus(true), &mut doc);
		assert!(doc.is_hidden(&short));
		let outcome = report.items.iter().find(|item| item.video_id.as_deref() == Some("sh1")).unwrap();
		assert_eq!(outcome.rule, "short-form");
		assert!(outcome.title.is_empty());
	}

	#[test]
	fn block_shorts_hides_reel_containers() {
		let mut doc = MemoryDocument::new("/");
		let root = doc.root();
		let reel = doc.append(root, listing("ytd-reel-video-renderer", "Chemistry lesson", "Khan Academy", "/watch?v=r1"));
		let mut rec = reconciler();

		rec.apply(&focus(true), &mut doc);
		assert!(doc.is_hidden(&reel));

		rec.apply(&focus(false), &mut doc);
		assert!(!doc.is_hidden(&reel));
		assert!(!rec.is_marked(&reel));
	}

	#[test]
	fn disabling_restores_only_marked_nodes() {
		let Feed { mut doc, prank, short, .. } = feed();
		let mut rec = reconciler();
		let root = doc.root();
		let site_hidden = doc.append(root, ElementSnapshot::new("div").attr("id", "site-owned"));
		doc.set_hidden(&site_hidden, true);

		rec.apply(&focus(true), &mut doc);
		assert!(doc.is_hidden(&prank) && doc.is_hidden(&short));

		let report = rec.apply(&Configuration::default(), &mut doc);
		assert_eq!(report.mode, PassMode::Restore);
		assert_eq!(report.restored, 2);
		assert!(report.items.is_empty());
		assert_eq!(doc.hidden_nodes(), vec![site_hidden]);
		assert_eq!(rec.marked_count(), 0);
	}

	#[test]
	fn educational_item_is_restored_after_becoming_allowed() {
		let Feed { mut doc, prank, .. } = feed();
		let mut rec = reconciler();
		rec.apply(&focus(false), &mut doc);
		assert!(doc.is_hidden(&prank));

		let trusting = Configuration {
			focus_mode_enabled: true,
			channel_whitelist: vec!["Laughs".to_string()],
			..Default::default()
		};
		// The blacklist still vetoes "prank".
		rec.apply(&trusting, &mut doc);
		assert!(doc.is_hidden(&prank));

		let title = doc.query_first(Some(&prank), "#video-title").unwrap();
		doc.set_text(title, "Dimensional analysis explained");
		let report = rec.apply(&trusting, &mut doc);
		assert!(!doc.is_hidden(&prank));
		assert!(!rec.is_marked(&prank));
		assert_eq!(report.restored, 1);
	}

	#[test]
	fn nodes_matching_several_selectors_are_processed_once() {
		let mut selectors = SelectorSet::youtube();
		selectors.listings.push((ListingCategory::CompactVideo, ".entry".to_string()));
		let mut rec = Reconciler::new(selectors);

		let mut doc = MemoryDocument::new("/");
		let root = doc.root();
		doc.append(root, listing("ytd-video-renderer", "Funny cats", "", "/watch?v=c").attr("class", "entry"));

		let report = rec.apply(&focus(false), &mut doc);
		assert_eq!(report.scanned, 1);
		assert_eq!(report.items[0].category, ListingCategory::Video);
	}

	#[test]
	fn shelves_with_suppressed_headers_are_hidden() {
		let mut doc = MemoryDocument::new("/");
		let root = doc.root();
		let shorts = doc.append(root, shelf("Shorts"));
		let trending = doc.append(root, shelf("Trending now"));
		let popular = doc.append(root, shelf("Popular uploads"));
		let plain = doc.append(root, shelf("Recommended"));
		let mut rec = reconciler();

		let report = rec.apply(&focus(false), &mut doc);
		assert!(doc.is_hidden(&shorts) && doc.is_hidden(&trending));
		assert!(!doc.is_hidden(&popular) && !doc.is_hidden(&plain));
		assert_eq!(report.shelves_hidden, 2);

		rec.apply(&focus(true), &mut doc);
		assert!(doc.is_hidden(&popular));

		rec.apply(&focus(false), &mut doc);
		assert!(!doc.is_hidden(&popular));
		assert!(!rec.is_marked(&popular));
	}

	#[test]
	fn playlist_entries_are_classified_on_playlist_pages_only() {
		let mut doc = MemoryDocument::new("/");
		let root = doc.root();
		let entry = doc.append(root, listing("ytd-playlist-video-renderer", "Best song ever", "Band", "/watch?v=p1"));
		let mut rec = reconciler();

		rec.apply(&focus(false), &mut doc);
		assert!(!doc.is_hidden(&entry));

		doc.navigate("/playlist?list=PL1");
		let report = rec.apply(&focus(false), &mut doc);
		assert!(doc.is_hidden(&entry));
		assert_eq!(report.items.last().map(|item| item.category), Some(ListingCategory::PlaylistEntry));
	}

	#[test]
	fn blocked_watch_page_pauses_and_shows_overlay() {
		let mut doc = watch_page("/watch?v=x1", "Minecraft speedrun highlights", "Gamer");
		let mut rec = reconciler();

		let report = rec.apply(&focus(false), &mut doc);

		assert_eq!(report.detail, DetailOutcome::Blocked { rule: "blacklisted" });
		assert_eq!(doc.media_paused(), Some(true));
		assert_eq!(doc.overlay_reason(OVERLAY_ELEMENT_ID).as_deref(), Some(DEFAULT_BLOCK_REASON));
		assert_eq!(report.overlay.as_deref(), Some(DEFAULT_BLOCK_REASON));
	}

	#[test]
	fn repeated_blocked_passes_keep_a_single_overlay() {
		let mut doc = watch_page("/watch?v=x1", "Minecraft speedrun highlights", "Gamer");
		let mut rec = reconciler();

		rec.apply(&focus(false), &mut doc);
		rec.apply(&focus(false), &mut doc);
		assert_eq!(doc.count_id(OVERLAY_ELEMENT_ID), 1);
	}

	#[test]
	fn allowed_watch_page_removes_overlay() {
		let mut doc = watch_page("/watch?v=x1", "Minecraft speedrun highlights", "Gamer");
		let mut rec = reconciler();
		rec.apply(&focus(false), &mut doc);

		let title = doc.query_first(None, "h1.title yt-formatted-string").unwrap();
		doc.set_text(title, "Quantum mechanics lecture 2");
		doc.navigate("/watch?v=x2");
		let report = rec.apply(&focus(false), &mut doc);

		assert_eq!(report.detail, DetailOutcome::Allowed { rule: "allow-keyword" });
		assert!(!doc.has_overlay(OVERLAY_ELEMENT_ID));
		assert!(!rec.overlay().is_shown());
	}

	#[test]
	fn short_form_view_is_blocked_without_classification() {
		let mut doc = watch_page("/shorts/abc", "Dance challenge!!", "");
		let mut rec = reconciler();

		let report = rec.apply(&focus(true), &mut doc);

		assert_eq!(report.detail, DetailOutcome::ShortsBlocked);
		assert_eq!(doc.media_paused(), Some(true));
		assert_eq!(doc.overlay_reason(OVERLAY_ELEMENT_ID).as_deref(), Some(SHORTS_BLOCK_REASON));
	}

	#[test]
	fn short_form_view_is_classified_when_not_blocking_shorts() {
		let mut doc = watch_page("/shorts/abc", "Khan Academy: fractions", "Khan Academy");
		let report = reconciler().apply(&focus(false), &mut doc);
		assert_eq!(report.detail, DetailOutcome::Allowed { rule: "trusted-channel" });
		assert_eq!(doc.media_paused(), Some(false));
	}

	#[test]
	fn first_blocker_reason_wins() {
		let mut doc = watch_page("/shorts/abc", "Dance challenge!!", "");
		let mut rec = reconciler();
		rec.apply(&focus(false), &mut doc);
		assert_eq!(rec.overlay().reason(), Some(DEFAULT_BLOCK_REASON));

		rec.apply(&focus(true), &mut doc);
		assert_eq!(rec.overlay().reason(), Some(DEFAULT_BLOCK_REASON));
		assert_eq!(doc.overlay_reason(OVERLAY_ELEMENT_ID).as_deref(), Some(DEFAULT_BLOCK_REASON));
	}

	#[test]
	fn overlay_already_on_page_is_adopted() {
		let mut doc = watch_page("/watch?v=x1", "Minecraft speedrun highlights", "Gamer");
		doc.mount_overlay(OVERLAY_ELEMENT_ID, SHORTS_BLOCK_REASON);
		let mut rec = reconciler();

		let report = rec.apply(&focus(false), &mut doc);

		assert_eq!(report.detail, DetailOutcome::Blocked { rule: "blacklisted" });
		assert_eq!(doc.count_id(OVERLAY_ELEMENT_ID), 1);
		assert_eq!(rec.overlay().reason(), Some(SHORTS_BLOCK_REASON));
		assert_eq!(report.overlay, doc.overlay_reason(OVERLAY_ELEMENT_ID));
	}

	#[test]
	fn navigating_to_a_feed_dismisses_overlay() {
		let mut doc = watch_page("/watch?v=x1", "Minecraft speedrun highlights", "Gamer");
		let mut rec = reconciler();
		rec.apply(&focus(false), &mut doc);

		doc.navigate("/");
		let report = rec.apply(&focus(false), &mut doc);
		assert_eq!(report.detail, DetailOutcome::NotDetailView);
		assert!(!doc.has_overlay(OVERLAY_ELEMENT_ID));
	}

	#[test]
	fn allow_once_holds_until_navigation() {
		let mut doc = watch_page("/watch?v=x1", "Minecraft speedrun highlights", "Gamer");
		let mut rec = reconciler();
		rec.apply(&focus(false), &mut doc);

		assert!(rec.allow_once(&mut doc));
		assert_eq!(doc.media_paused(), Some(false));

		let report = rec.apply(&focus(false), &mut doc);
		assert_eq!(report.detail, DetailOutcome::AllowedOnce);
		assert!(!doc.has_overlay(OVERLAY_ELEMENT_ID));
		assert_eq!(doc.media_paused(), Some(false));

		doc.navigate("/watch?v=x3");
		let report = rec.apply(&focus(false), &mut doc);
		assert!(matches!(report.detail, DetailOutcome::Blocked { .. }));
		assert!(doc.has_overlay(OVERLAY_ELEMENT_ID));
	}

	#[test]
	fn allow_once_without_overlay_is_ignored() {
		let mut doc = watch_page("/watch?v=x1", "Quantum mechanics lecture 2", "Someone");
		let mut rec = reconciler();
		rec.apply(&focus(false), &mut doc);
		assert!(!rec.allow_once(&mut doc));
	}

	#[test]
	fn disabling_removes_overlay() {
		let mut doc = watch_page("/watch?v=x1", "Minecraft speedrun highlights", "Gamer");
		let mut rec = reconciler();
		rec.apply(&focus(false), &mut doc);

		rec.apply(&Configuration::default(), &mut doc);
		assert!(!doc.has_overlay(OVERLAY_ELEMENT_ID));
		assert!(!rec.overlay().is_shown());
	}

	#[test]
	fn externally_removed_overlay_is_remounted() {
		let mut doc = watch_page("/watch?v=x1", "Minecraft speedrun highlights", "Gamer");
		let mut rec = reconciler();
		rec.apply(&focus(false), &mut doc);

		doc.unmount_overlay(OVERLAY_ELEMENT_ID);
		rec.apply(&focus(false), &mut doc);
		assert!(doc.has_overlay(OVERLAY_ELEMENT_ID));
	}

	#[test]
	fn removed_nodes_drop_their_markers() {
		let Feed { mut doc, prank, .. } = feed();
		let mut rec = reconciler();
		rec.apply(&focus(false), &mut doc);
		assert!(rec.is_marked(&prank));

		doc.remove(prank);
		rec.apply(&focus(false), &mut doc);
		assert!(!rec.is_marked(&prank));

		let report = rec.restore_all(&mut doc);
		assert_eq!(report.restored, 0);
	}

	#[test]
	fn shelf_matching_is_substring_based() {
		assert!(shelf_is_suppressed("youtube shorts", false));
		assert!(!shelf_is_suppressed("most popular", false));
		assert!(shelf_is_suppressed("most popular", true));
		assert!(!shelf_is_suppressed("", true));
	}
}
