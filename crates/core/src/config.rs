//! Engine configuration and the settings store it is read from.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use focusflow_protocol::{ENGINE_KEYS, StoredSettings};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::warn;

use crate::classify::{self, DEFAULT_ALLOW_KEYWORDS, DEFAULT_CHANNEL_WHITELIST, Verdict};
use crate::error::{Error, Result};

/// One consistent snapshot of the user's settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
	pub focus_mode_enabled: bool,
	/// Empty means "use [`DEFAULT_ALLOW_KEYWORDS`]".
	pub allow_keywords: Vec<String>,
	/// Empty means "use [`DEFAULT_CHANNEL_WHITELIST`]".
	pub channel_whitelist: Vec<String>,
	pub block_shorts: bool,
}

impl Configuration {
	/// Missing fields read as `false` / empty.
	pub fn from_settings(settings: StoredSettings) -> Self {
		Self {
			focus_mode_enabled: settings.focus_mode_enabled.unwrap_or(false),
			allow_keywords: settings.allow_keywords.unwrap_or_default(),
			channel_whitelist: settings.channel_whitelist.unwrap_or_default(),
			block_shorts: settings.block_shorts.unwrap_or(false),
		}
	}

	pub fn to_settings(&self) -> StoredSettings {
		StoredSettings {
			focus_mode_enabled: Some(self.focus_mode_enabled),
			channel_whitelist: Some(self.channel_whitelist.clone()),
			allow_keywords: Some(self.allow_keywords.clone()),
			block_shorts: Some(self.block_shorts),
		}
	}

	/// Lists the classifier should actually use.
	pub fn effective_lists(&self) -> EffectiveLists<'_> {
		EffectiveLists {
			allow_keywords: or_defaults(&self.allow_keywords, DEFAULT_ALLOW_KEYWORDS),
			channel_whitelist: or_defaults(&self.channel_whitelist, DEFAULT_CHANNEL_WHITELIST),
		}
	}
}

fn or_defaults<'a>(configured: &'a [String], defaults: &'static [&'static str]) -> Vec<&'a str> {
	if configured.is_empty() {
		defaults.to_vec()
	} else {
		configured.iter().map(String::as_str).collect()
	}
}

/// Allow-keywords and trusted channels after default substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveLists<'a> {
	pub allow_keywords: Vec<&'a str>,
	pub channel_whitelist: Vec<&'a str>,
}

impl EffectiveLists<'_> {
	pub fn explain(&self, title: &str, channel: &str) -> Verdict<'_> {
		classify::explain(title, channel, self.allow_keywords.as_slice(), self.channel_whitelist.as_slice())
	}

	pub fn classify(&self, title: &str, channel: &str) -> bool {
		self.explain(title, channel).is_educational()
	}
}

/// Splits comma-separated list input: entries are trimmed and blanks dropped.
pub fn parse_list(input: &str) -> Vec<String> {
	input
		.split(',')
		.map(str::trim)
		.filter(|entry| !entry.is_empty())
		.map(ToString::to_string)
		.collect()
}

/// Asynchronous key/value settings store.
#[async_trait]
pub trait ConfigStore: Send + Sync {
	/// Values for the requested keys; absent keys are simply omitted.
	async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>>;

	async fn set(&self, entries: Map<String, Value>) -> Result<()>;

	async fn remove(&self, keys: &[&str]) -> Result<()>;
}

/// Reads the engine keys once and builds a [`Configuration`].
pub async fn load_configuration(store: &dyn ConfigStore) -> Result<Configuration> {
	let entries = store.get(&ENGINE_KEYS).await?;
	let decoded = StoredSettings::from_entries(&entries);
	for key in &decoded.rejected {
		warn!(target = "focusflow.store", key = %key, "ignoring malformed settings value");
	}
	Ok(Configuration::from_settings(decoded.settings))
}

/// Writes every field of `config`.
pub async fn save_configuration(store: &dyn ConfigStore, config: &Configuration) -> Result<()> {
	store.set(config.to_settings().to_entries()).await
}

/// Process-local store, also used to simulate outages in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: Mutex<Map<String, Value>>,
	unavailable: AtomicBool,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_configuration(config: &Configuration) -> Self {
		let store = Self::new();
		*store.entries.lock() = config.to_settings().to_entries();
		store
	}

	/// Makes every subsequent call fail until switched back.
	pub fn set_unavailable(&self, unavailable: bool) {
		self.unavailable.store(unavailable, Ordering::SeqCst);
	}

	/// Synchronous write, for hosts updating settings outside async code.
	pub fn insert(&self, key: &str, value: Value) {
		self.entries.lock().insert(key.to_string(), value);
	}

	fn check_available(&self) -> Result<()> {
		if self.unavailable.load(Ordering::SeqCst) {
			return Err(Error::store("memory store marked unavailable"));
		}
		Ok(())
	}
}

#[async_trait]
impl ConfigStore for MemoryStore {
	async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
		self.check_available()?;
		let entries = self.entries.lock();
		Ok(keys
			.iter()
			.filter_map(|key| entries.get(*key).map(|value| (key.to_string(), value.clone())))
			.collect())
	}

	async fn set(&self, entries: Map<String, Value>) -> Result<()> {
		self.check_available()?;
		self.entries.lock().extend(entries);
		Ok(())
	}

	async fn remove(&self, keys: &[&str]) -> Result<()> {
		self.check_available()?;
		let mut entries = self.entries.lock();
		for key in keys {
			entries.remove(*key);
		}
		Ok(())
	}
}
