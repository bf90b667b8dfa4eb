//! Error types for the filtering engine.

use thiserror::Error;

/// Result alias used throughout `focusflow`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the engine and its collaborators.
///
/// Extraction misses and missing nodes are not errors; they degrade to empty
/// text and no-op side effects.
#[derive(Debug, Error)]
pub enum Error {
	/// The configuration store could not be read or written.
	#[error("settings store failed: {0}")]
	Store(String),

	/// A selector could not be parsed by the in-memory document.
	#[error("invalid selector `{selector}`: {reason}")]
	InvalidSelector { selector: String, reason: String },

	/// The engine's event channel is gone.
	#[error("engine is no longer running")]
	ChannelClosed,

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl Error {
	pub fn store(message: impl Into<String>) -> Self {
		Error::Store(message.into())
	}
}
