use clap::Parser;
use focusflow_cli::cli::Cli;
use focusflow_cli::commands::{self, command_name, error_code};
use focusflow_cli::logging;
use focusflow_cli::output::{CommandResult, OutputFormat, ResultBuilder, print_error_stderr, print_result};
use tracing::error;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let format = cli.format;
	let name = command_name(&cli.command);

	if let Err(err) = commands::dispatch(cli).await {
		let message = format!("{err:#}");
		error!(target = "focusflow.cli", error = %message, "command failed");
		let result: CommandResult<()> = ResultBuilder::new(name).error(error_code(&err), message).build();
		match format {
			OutputFormat::Text => {
				if let Some(error) = &result.error {
					print_error_stderr(error);
				}
			}
			_ => print_result(&result, format),
		}
		std::process::exit(1);
	}
}
