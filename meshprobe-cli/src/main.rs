//! meshprobe -- controller private API integration probe.
//!
//! Entry point: parses arguments, initializes logging from the effective
//! configuration, and dispatches to the subcommand handlers. Errors are
//! mapped to stable process exit codes via [`error::CliError`].

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use error::CliError;
use output::OutputWriter;

use meshprobe_core::config::MeshprobeConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // Logging settings come from config; the --log-level flag wins.
    let mut config = MeshprobeConfig::load_or_default(&cli.config).await?;
    if let Some(level) = &cli.log_level {
        config.general.log_level = level.clone();
    }
    logging::init_tracing(&config.general).map_err(|e| CliError::Command(e.to_string()))?;

    tracing::debug!(config = %cli.config.display(), "meshprobe starting");

    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Run(args) => commands::run::execute(args, &cli.config, &writer).await,
        Commands::Resolve(args) => commands::resolve::execute(args, &cli.config, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}
