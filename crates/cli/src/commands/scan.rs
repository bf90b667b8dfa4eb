use std::path::PathBuf;

use anyhow::{Context, Result};
use focusflow::config::{ConfigStore, load_configuration};
use focusflow::{PageSnapshot, PassReport, Reconciler, SelectorSet};
use serde::Serialize;
use tracing::debug;

use super::Outcome;
use crate::cli::ScanArgs;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanData {
	pub snapshot: PathBuf,
	pub focus_mode_enabled: bool,
	pub block_shorts: bool,
	#[serde(flatten)]
	pub report: PassReport,
}

pub async fn run(store: &dyn ConfigStore, args: ScanArgs) -> Result<Outcome<ScanData>> {
	let snapshot = PageSnapshot::load(&args.snapshot).with_context(|| format!("loading snapshot {}", args.snapshot.display()))?;

	let mut config = load_configuration(store).await?;
	if args.force {
		config.focus_mode_enabled = true;
	}
	if let Some(shorts) = args.shorts {
		config.block_shorts = shorts.is_on();
	}

	let mut document = snapshot.into_document();
	let mut reconciler = Reconciler::new(SelectorSet::youtube());
	let report = reconciler.apply(&config, &mut document);
	debug!(target = "focusflow.cli", hidden = report.hidden, scanned = report.scanned, "snapshot scanned");

	let outcome = Outcome::new(ScanData {
		snapshot: args.snapshot,
		focus_mode_enabled: config.focus_mode_enabled,
		block_shorts: config.block_shorts,
		report,
	});
	if !config.focus_mode_enabled {
		return Ok(outcome.info("focus mode is off; nothing was filtered (pass --force to scan anyway)"));
	}
	Ok(outcome)
}
