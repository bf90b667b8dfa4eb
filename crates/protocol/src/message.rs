//! Control messages broadcast from the settings surface to open pages.

use serde::{Deserialize, Serialize};

/// An inbound control message.
///
/// Serialized with a `type` tag, e.g. `{"type":"focusflow:enabled"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControlMessage {
	/// Focus mode was switched on or its settings changed; run a full pass.
	#[serde(rename = "focusflow:enabled")]
	Enabled,
	/// Focus mode was switched off; restore everything immediately.
	#[serde(rename = "focusflow:disabled")]
	Disabled,
}

impl ControlMessage {
	/// Parses a raw JSON message.
	pub fn from_json(raw: &str) -> serde_json::Result<Self> {
		serde_json::from_str(raw)
	}
}
