use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "focusflow")]
#[command(about = "FocusFlow - keep video feeds educational")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format
	#[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Toon)]
	pub format: OutputFormat,

	/// Settings file (defaults to $FOCUSFLOW_STORE, then the user config dir)
	#[arg(long, global = true, value_name = "FILE")]
	pub store: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Classify a single title/channel pair and show the deciding rule
	Classify(ClassifyArgs),

	/// Show or change stored settings
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},

	/// Run one filtering pass over a page snapshot
	Scan(ScanArgs),
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
	/// Listing title
	#[arg(long)]
	pub title: String,

	/// Channel name
	#[arg(long, default_value = "")]
	pub channel: String,

	/// Allow-keyword to use instead of the stored list (repeatable)
	#[arg(long = "keyword", value_name = "KEYWORD")]
	pub keywords: Vec<String>,

	/// Trusted channel to use instead of the stored list (repeatable)
	#[arg(long = "trusted-channel", value_name = "CHANNEL")]
	pub trusted_channels: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
	/// Page snapshot JSON file
	pub snapshot: PathBuf,

	/// Treat focus mode as on regardless of the stored value
	#[arg(long)]
	pub force: bool,

	/// Override the stored short-form setting
	#[arg(long, value_enum, value_name = "on|off")]
	pub shorts: Option<Toggle>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
	/// Print the stored settings and the lists in effect
	Show,

	/// Turn focus mode on
	Enable,

	/// Turn focus mode off
	Disable,

	/// Turn short-form blocking on or off
	Shorts {
		#[arg(value_enum)]
		state: Toggle,
	},

	/// Replace the allow-keyword list (comma separated; empty restores defaults)
	Keywords {
		#[arg(default_value = "")]
		list: String,
	},

	/// Replace the trusted channel list (comma separated; empty restores defaults)
	Channels {
		#[arg(default_value = "")]
		list: String,
	},

	/// Forget the keyword and channel lists
	Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
	On,
	Off,
}

impl Toggle {
	pub fn is_on(self) -> bool {
		self == Toggle::On
	}
}
