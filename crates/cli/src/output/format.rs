use std::fmt;

use clap::ValueEnum;

/// How command results are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// TOON, compact and line oriented
	#[default]
	Toon,
	/// Pretty-printed JSON
	Json,
	/// Human-readable summary
	Text,
}

impl fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			OutputFormat::Toon => "toon",
			OutputFormat::Json => "json",
			OutputFormat::Text => "text",
		})
	}
}
