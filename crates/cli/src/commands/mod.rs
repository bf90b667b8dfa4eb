mod classify;
mod config;
mod scan;

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::cli::{Cli, Commands, ConfigAction};
use crate::output::{DiagnosticLevel, ErrorCode, OutputFormat, ResultBuilder, print_result};
use crate::store::FileStore;

/// What a command hands back for the envelope.
#[derive(Debug)]
pub struct Outcome<T: Serialize> {
	pub data: T,
	pub diagnostics: Vec<(DiagnosticLevel, String)>,
}

impl<T: Serialize> Outcome<T> {
	pub fn new(data: T) -> Self {
		Self {
			data,
			diagnostics: Vec::new(),
		}
	}

	pub fn info(mut self, message: impl Into<String>) -> Self {
		self.diagnostics.push((DiagnosticLevel::Info, message.into()));
		self
	}

	pub fn warning(mut self, message: impl Into<String>) -> Self {
		self.diagnostics.push((DiagnosticLevel::Warning, message.into()));
		self
	}
}

/// Runs the selected command and prints its result envelope.
pub async fn dispatch(cli: Cli) -> Result<()> {
	let store = FileStore::resolve(cli.store)?;
	debug!(target = "focusflow.cli", store = %store.path().display(), "using settings store");
	let inputs = serde_json::json!({ "store": store.path() });
	let name = command_name(&cli.command);

	match cli.command {
		Commands::Classify(args) => emit(name, inputs, classify::run(&store, args).await?, cli.format),
		Commands::Config { action } => emit(name, inputs, config::run(&store, action).await?, cli.format),
		Commands::Scan(args) => emit(name, inputs, scan::run(&store, args).await?, cli.format),
	}

	Ok(())
}

/// Envelope name of a command, e.g. `config shorts`.
pub fn command_name(command: &Commands) -> &'static str {
	match command {
		Commands::Classify(_) => "classify",
		Commands::Scan(_) => "scan",
		Commands::Config { action } => match action {
			ConfigAction::Show => "config show",
			ConfigAction::Enable => "config enable",
			ConfigAction::Disable => "config disable",
			ConfigAction::Shorts { .. } => "config shorts",
			ConfigAction::Keywords { .. } => "config keywords",
			ConfigAction::Channels { .. } => "config channels",
			ConfigAction::Reset => "config reset",
		},
	}
}

/// Maps a failure onto an envelope error code.
pub fn error_code(err: &anyhow::Error) -> ErrorCode {
	match err.downcast_ref::<focusflow::Error>() {
		Some(focusflow::Error::Store(_)) => ErrorCode::StoreUnavailable,
		Some(focusflow::Error::Json(_)) => ErrorCode::SnapshotInvalid,
		Some(focusflow::Error::Io(_)) => ErrorCode::IoError,
		Some(focusflow::Error::InvalidSelector { .. }) => ErrorCode::InvalidInput,
		Some(focusflow::Error::ChannelClosed) | None => ErrorCode::InternalError,
	}
}

fn emit<T: Serialize>(name: &str, inputs: serde_json::Value, outcome: Outcome<T>, format: OutputFormat) {
	let mut builder = ResultBuilder::new(name).inputs(inputs).data(outcome.data);
	for (level, message) in outcome.diagnostics {
		builder = builder.diagnostic(level, message);
	}
	print_result(&builder.build(), format);
}
