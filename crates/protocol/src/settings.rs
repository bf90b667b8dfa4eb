//! Persisted settings record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::keys::{BLOCK_SHORTS_KEY, CHANNEL_WHITELIST_KEY, FOCUS_MODE_KEY, KEYWORD_ALLOWLIST_KEY};

/// Settings as they appear in the key/value store.
///
/// Every field is optional: the store may hold any subset of keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSettings {
	#[serde(rename = "focus_mode_enabled", default, skip_serializing_if = "Option::is_none")]
	pub focus_mode_enabled: Option<bool>,
	#[serde(rename = "focus_whitelist_channels", default, skip_serializing_if = "Option::is_none")]
	pub channel_whitelist: Option<Vec<String>>,
	#[serde(rename = "focus_allow_keywords", default, skip_serializing_if = "Option::is_none")]
	pub allow_keywords: Option<Vec<String>>,
	#[serde(rename = "focus_block_shorts", default, skip_serializing_if = "Option::is_none")]
	pub block_shorts: Option<bool>,
}

/// Result of a lenient decode: the usable settings plus the keys whose
/// values had the wrong shape and were ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedSettings {
	pub settings: StoredSettings,
	pub rejected: Vec<String>,
}

impl StoredSettings {
	/// Decodes a store response field by field.
	///
	/// A value of the wrong type is treated as missing instead of failing the
	/// whole record, so one corrupted key never blocks the others.
	pub fn from_entries(entries: &Map<String, Value>) -> DecodedSettings {
		let mut rejected = Vec::new();

		let focus_mode_enabled = decode_bool(entries, FOCUS_MODE_KEY, &mut rejected);
		let channel_whitelist = decode_list(entries, CHANNEL_WHITELIST_KEY, &mut rejected);
		let allow_keywords = decode_list(entries, KEYWORD_ALLOWLIST_KEY, &mut rejected);
		let block_shorts = decode_bool(entries, BLOCK_SHORTS_KEY, &mut rejected);

		DecodedSettings {
			settings: StoredSettings {
				focus_mode_enabled,
				channel_whitelist,
				allow_keywords,
				block_shorts,
			},
			rejected,
		}
	}

	/// Encodes the present fields as store entries.
	pub fn to_entries(&self) -> Map<String, Value> {
		match serde_json::to_value(self) {
			Ok(Value::Object(map)) => map,
			_ => Map::new(),
		}
	}
}

fn decode_bool(entries: &Map<String, Value>, key: &str, rejected: &mut Vec<String>) -> Option<bool> {
	match entries.get(key)? {
		Value::Bool(value) => Some(*value),
		Value::Null => None,
		_ => {
			rejected.push(key.to_string());
			None
		}
	}
}

fn decode_list(entries: &Map<String, Value>, key: &str, rejected: &mut Vec<String>) -> Option<Vec<String>> {
	match entries.get(key)? {
		Value::Array(items) => {
			let strings: Option<Vec<String>> = items.iter().map(|item| item.as_str().map(ToString::to_string)).collect();
			if strings.is_none() {
				rejected.push(key.to_string());
			}
			strings
		}
		Value::Null => None,
		_ => {
			rejected.push(key.to_string());
			None
		}
	}
}
