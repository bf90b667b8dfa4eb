//! Site adapter tables: where listings, shelves and text live in the markup.
//!
//! The engine only sees these through [`SelectorSet`]; swapping the table is
//! enough to retarget a different layout.

use serde::Serialize;

use crate::extract::Strategy;

/// Which listing selector an item was found through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingCategory {
	RichItem,
	Video,
	GridVideo,
	RichGridMedia,
	Reel,
	CompactVideo,
	Playlist,
	PlaylistEntry,
}

impl ListingCategory {
	/// Structural short-form containers.
	pub fn is_short_form(&self) -> bool {
		matches!(self, ListingCategory::Reel)
	}
}

/// Selector tables consumed by the extractor and the reconciler.
#[derive(Debug, Clone)]
pub struct SelectorSet {
	/// Listing containers, enumerated in order every pass.
	pub listings: Vec<(ListingCategory, String)>,
	/// Entries of a playlist view.
	pub playlist_entries: String,
	/// Shelf/section containers.
	pub shelves: String,
	/// Header text inside a shelf.
	pub shelf_header: String,
	/// Thumbnail anchor inside a listing, whose `href` identifies the content.
	pub item_link: String,
	pub item_title: Vec<Strategy>,
	pub item_channel: Vec<Strategy>,
	pub detail_title: Vec<Strategy>,
	pub detail_channel: Vec<Strategy>,
}

impl SelectorSet {
	/// Tables for the YouTube desktop layout.
	pub fn youtube() -> Self {
		let listings = [
			(ListingCategory::RichItem, "ytd-rich-item-renderer"),
			(ListingCategory::Video, "ytd-video-renderer"),
			(ListingCategory::GridVideo, "ytd-grid-video-renderer"),
			(ListingCategory::RichGridMedia, "ytd-rich-grid-media"),
			(ListingCategory::Reel, "ytd-reel-video-renderer"),
			(ListingCategory::CompactVideo, "ytd-compact-video-renderer"),
			(ListingCategory::Playlist, "ytd-playlist-renderer"),
		];

		Self {
			listings: listings.into_iter().map(|(category, selector)| (category, selector.to_string())).collect(),
			playlist_entries: "ytd-playlist-video-renderer".to_string(),
			shelves: "ytd-rich-section-renderer".to_string(),
			shelf_header: "#title".to_string(),
			item_link: "a#thumbnail".to_string(),
			item_title: texts(&["#video-title", "a#video-title", "yt-formatted-string#title", "h3 a", "h3.title"]),
			item_channel: texts(&[
				"ytd-channel-name",
				"ytd-channel-name a",
				".ytd-channel-name",
				"a.yt-simple-endpoint.yt-formatted-string",
				"span.channel-title",
			]),
			detail_title: vec![
				Strategy::text("h1.title yt-formatted-string"),
				Strategy::text_or_attribute("meta[name='title']", "content"),
			],
			detail_channel: texts(&["ytd-channel-name a", "ytd-channel-name"]),
		}
	}
}

impl Default for SelectorSet {
	fn default() -> Self {
		Self::youtube()
	}
}

fn texts(selectors: &[&str]) -> Vec<Strategy> {
	selectors.iter().map(|selector| Strategy::text(*selector)).collect()
}
