use anyhow::Result;
use focusflow::config::{ConfigStore, parse_list};
use focusflow::{Configuration, ControlMessage};
use focusflow_protocol::{BLOCK_SHORTS_KEY, CHANNEL_WHITELIST_KEY, ENGINE_KEYS, FOCUS_MODE_KEY, KEYWORD_ALLOWLIST_KEY, RESETTABLE_KEYS, StoredSettings};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::info;

use super::Outcome;
use crate::cli::ConfigAction;

/// Stored settings plus the lists a pass would actually use.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
	pub focus_mode_enabled: bool,
	pub block_shorts: bool,
	pub allow_keywords: Vec<String>,
	pub channel_whitelist: Vec<String>,
	pub effective_allow_keywords: Vec<String>,
	pub effective_channel_whitelist: Vec<String>,
	/// Message a host should broadcast to open pages after this change.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<ControlMessage>,
}

impl SettingsView {
	fn new(config: &Configuration, message: Option<ControlMessage>) -> Self {
		let lists = config.effective_lists();
		Self {
			focus_mode_enabled: config.focus_mode_enabled,
			block_shorts: config.block_shorts,
			allow_keywords: config.allow_keywords.clone(),
			channel_whitelist: config.channel_whitelist.clone(),
			effective_allow_keywords: owned(&lists.allow_keywords),
			effective_channel_whitelist: owned(&lists.channel_whitelist),
			message,
		}
	}
}

fn owned(list: &[&str]) -> Vec<String> {
	list.iter().map(ToString::to_string).collect()
}

pub async fn run(store: &dyn ConfigStore, action: ConfigAction) -> Result<Outcome<SettingsView>> {
	let changed = !matches!(action, ConfigAction::Show);
	let message = match action {
		ConfigAction::Show => None,
		ConfigAction::Enable => {
			store.set(entry(FOCUS_MODE_KEY, json!(true))).await?;
			info!(target = "focusflow.cli", "focus mode enabled");
			Some(ControlMessage::Enabled)
		}
		ConfigAction::Disable => {
			store.set(entry(FOCUS_MODE_KEY, json!(false))).await?;
			info!(target = "focusflow.cli", "focus mode disabled");
			Some(ControlMessage::Disabled)
		}
		ConfigAction::Shorts { state } => {
			store.set(entry(BLOCK_SHORTS_KEY, json!(state.is_on()))).await?;
			None
		}
		ConfigAction::Keywords { list } => {
			store.set(entry(KEYWORD_ALLOWLIST_KEY, json!(parse_list(&list)))).await?;
			None
		}
		ConfigAction::Channels { list } => {
			store.set(entry(CHANNEL_WHITELIST_KEY, json!(parse_list(&list)))).await?;
			None
		}
		ConfigAction::Reset => {
			store.remove(&RESETTABLE_KEYS).await?;
			info!(target = "focusflow.cli", "keyword and channel lists reset");
			None
		}
	};

	let decoded = StoredSettings::from_entries(&store.get(&ENGINE_KEYS).await?);
	let config = Configuration::from_settings(decoded.settings);

	// Changes other than the on/off switch only need a re-run while focus is on.
	let message = match message {
		Some(message) => Some(message),
		None if changed && config.focus_mode_enabled => Some(ControlMessage::Enabled),
		None => None,
	};

	let mut outcome = Outcome::new(SettingsView::new(&config, message));
	for key in decoded.rejected {
		outcome = outcome.warning(format!("stored value for `{key}` has the wrong type and is ignored"));
	}
	if changed && message.is_none() {
		outcome = outcome.info("focus mode is off; the change applies once it is enabled");
	}
	Ok(outcome)
}

fn entry(key: &str, value: Value) -> Map<String, Value> {
	let mut entries = Map::new();
	entries.insert(key.to_string(), value);
	entries
}
