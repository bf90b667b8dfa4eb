//! Settings store key names.

/// Whether focus mode is active (`bool`).
pub const FOCUS_MODE_KEY: &str = "focus_mode_enabled";

/// Trusted channel name fragments (`[string]`).
pub const CHANNEL_WHITELIST_KEY: &str = "focus_whitelist_channels";

/// Educational keyword fragments (`[string]`).
pub const KEYWORD_ALLOWLIST_KEY: &str = "focus_allow_keywords";

/// Whether short-form content is blocked outright (`bool`).
pub const BLOCK_SHORTS_KEY: &str = "focus_block_shorts";

/// Every key the engine reads at the start of a pass.
pub const ENGINE_KEYS: [&str; 4] = [FOCUS_MODE_KEY, CHANNEL_WHITELIST_KEY, KEYWORD_ALLOWLIST_KEY, BLOCK_SHORTS_KEY];

/// Keys cleared by a settings reset. Focus mode state is left alone.
pub const RESETTABLE_KEYS: [&str; 2] = [KEYWORD_ALLOWLIST_KEY, CHANNEL_WHITELIST_KEY];
