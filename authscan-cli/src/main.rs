//! authscan -- authentication log classifier
//!
//! Exit codes: 0 success, 1 command error, 2 configuration error,
//! 3 input log not found, 10 I/O error.

use std::process::ExitCode;

use clap::Parser;

use authscan_classifier::Classifier;
use authscan_core::config::AuthscanConfig;

use authscan_cli::cli::{Cli, Commands};
use authscan_cli::commands;
use authscan_cli::error::CliError;
use authscan_cli::logging;
use authscan_cli::output::OutputWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // `config validate` reports a broken file itself, so it gets defaults here.
    let config = match AuthscanConfig::load_or_default(&cli.config).await {
        Ok(config) => config,
        Err(_) if matches!(cli.command, Commands::Config(_)) => AuthscanConfig::default(),
        Err(e) => return report_error(CliError::from(e)),
    };

    if let Err(e) = logging::init_tracing(&config.general, cli.log_level.as_deref()) {
        return report_error(CliError::Config(e.to_string()));
    }

    tracing::debug!(config = %cli.config.display(), "authscan starting");

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(e),
    }
}

async fn run(cli: Cli, config: &AuthscanConfig) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Scan(args) => {
            let classifier = Classifier::builtin()?;
            commands::scan::execute(args, config, &classifier, &writer).await
        }
        Commands::Classify(args) => {
            let classifier = Classifier::builtin()?;
            commands::classify::execute(args, &classifier, &writer).await
        }
        Commands::Rules => {
            let classifier = Classifier::builtin()?;
            commands::rules::execute(&classifier, &writer).await
        }
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}

fn report_error(e: CliError) -> ExitCode {
    eprintln!("error: {e}");
    ExitCode::from(e.exit_code() as u8)
}
