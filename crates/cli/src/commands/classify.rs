use anyhow::Result;
use focusflow::Configuration;
use focusflow::config::{ConfigStore, load_configuration};
use serde::Serialize;

use super::Outcome;
use crate::cli::ClassifyArgs;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyData {
	pub title: String,
	pub channel: String,
	pub educational: bool,
	pub rule: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub term: Option<String>,
	pub keywords_from: ListSource,
	pub channels_from: ListSource,
}

/// Where a list used for the verdict came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListSource {
	Flags,
	Store,
	Defaults,
}

pub async fn run(store: &dyn ConfigStore, args: ClassifyArgs) -> Result<Outcome<ClassifyData>> {
	// Stored lists are only consulted for whatever the flags leave open.
	let config = if args.keywords.is_empty() || args.trusted_channels.is_empty() {
		load_configuration(store).await?
	} else {
		Configuration::default()
	};

	let (keywords, keywords_from) = pick(&args.keywords, &config.allow_keywords);
	let (channels, channels_from) = pick(&args.trusted_channels, &config.channel_whitelist);

	let effective = Configuration {
		allow_keywords: keywords,
		channel_whitelist: channels,
		..config
	};
	let lists = effective.effective_lists();
	let verdict = lists.explain(&args.title, &args.channel);

	Ok(Outcome::new(ClassifyData {
		educational: verdict.is_educational(),
		rule: verdict.rule(),
		term: verdict.term().map(ToString::to_string),
		title: args.title,
		channel: args.channel,
		keywords_from,
		channels_from,
	}))
}

fn pick(flags: &[String], stored: &[String]) -> (Vec<String>, ListSource) {
	if !flags.is_empty() {
		(flags.to_vec(), ListSource::Flags)
	} else if !stored.is_empty() {
		(stored.to_vec(), ListSource::Store)
	} else {
		(Vec::new(), ListSource::Defaults)
	}
}
