//! Educational-content classifier.
//!
//! A pure decision procedure over a title/channel pair. Rules run in a fixed
//! priority order and the first one that matches decides:
//!
//! 1. entertainment blacklist veto (title or channel)
//! 2. trusted channel
//! 3. allow-keyword (title or channel)
//! 4. short-title / emoji rejection
//! 5. closed-world default rejection
//!
//! All matching is plain substring containment on normalized text. "lyrics"
//! inside a longer word still counts; callers rely on that behavior.

mod lists;

use std::fmt;

pub use lists::{DEFAULT_ALLOW_KEYWORDS, DEFAULT_CHANNEL_WHITELIST, ENTERTAINMENT_BLACKLIST};

/// Titles shorter than this (in characters, after normalization) carry no signal.
pub const MIN_TITLE_CHARS: usize = 10;

/// The rule that decided a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'a> {
	/// An entertainment term matched the title or channel.
	Blacklisted(&'a str),
	/// The channel contains a trusted channel name.
	TrustedChannel(&'a str),
	/// The title or channel contains an allow-keyword.
	AllowKeyword(&'a str),
	/// The title is too short to judge.
	TooShort,
	/// The title contains pictographic emoji.
	Emoji,
	/// Nothing matched.
	NoSignal,
}

impl Verdict<'_> {
	pub fn is_educational(&self) -> bool {
		matches!(self, Verdict::TrustedChannel(_) | Verdict::AllowKeyword(_))
	}

	/// Stable rule name used in logs and CLI output.
	pub fn rule(&self) -> &'static str {
		match self {
			Verdict::Blacklisted(_) => "blacklisted",
			Verdict::TrustedChannel(_) => "trusted-channel",
			Verdict::AllowKeyword(_) => "allow-keyword",
			Verdict::TooShort => "too-short",
			Verdict::Emoji => "emoji",
			Verdict::NoSignal => "no-signal",
		}
	}

	/// The list entry that matched, when a list rule decided.
	pub fn term(&self) -> Option<&str> {
		match self {
			Verdict::Blacklisted(term) | Verdict::TrustedChannel(term) | Verdict::AllowKeyword(term) => Some(term),
			Verdict::TooShort | Verdict::Emoji | Verdict::NoSignal => None,
		}
	}
}

impl fmt::Display for Verdict<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.term() {
			Some(term) => write!(f, "{} ({term})", self.rule()),
			None => f.write_str(self.rule()),
		}
	}
}

/// Case-folds and trims.
pub fn normalize(s: &str) -> String {
	s.trim().to_lowercase()
}

/// Returns `true` if `s` contains a character in U+1F300..=U+1FAFF.
pub fn contains_emoji(s: &str) -> bool {
	s.chars().any(|c| ('\u{1F300}'..='\u{1FAFF}').contains(&c))
}

/// Classifies a title/channel pair, returning `true` for educational content.
pub fn classify<K, C>(title: &str, channel: &str, allow_keywords: &[K], channel_whitelist: &[C]) -> bool
where
	K: AsRef<str>,
	C: AsRef<str>,
{
	explain(title, channel, allow_keywords, channel_whitelist).is_educational()
}

/// Classifies a title/channel pair and reports the deciding rule.
pub fn explain<'a, K, C>(title: &str, channel: &str, allow_keywords: &'a [K], channel_whitelist: &'a [C]) -> Verdict<'a>
where
	K: AsRef<str>,
	C: AsRef<str>,
{
	let title = normalize(title);
	let channel = normalize(channel);

	if let Some(term) = ENTERTAINMENT_BLACKLIST
		.iter()
		.copied()
		.find(|term| title.contains(term) || channel.contains(term))
	{
		return Verdict::Blacklisted(term);
	}

	if let Some(name) = first_match(channel_whitelist, |needle| channel.contains(needle)) {
		return Verdict::TrustedChannel(name);
	}

	if let Some(keyword) = first_match(allow_keywords, |needle| title.contains(needle) || channel.contains(needle)) {
		return Verdict::AllowKeyword(keyword);
	}

	if title.chars().count() < MIN_TITLE_CHARS {
		return Verdict::TooShort;
	}
	if contains_emoji(&title) {
		return Verdict::Emoji;
	}

	Verdict::NoSignal
}

// Blank entries would match everything, so they are skipped.
fn first_match<'a, S: AsRef<str>>(list: &'a [S], matches: impl Fn(&str) -> bool) -> Option<&'a str> {
	list.iter().map(AsRef::as_ref).find(|entry| {
		let needle = normalize(entry);
		!needle.is_empty() && matches(&needle)
	})
}
