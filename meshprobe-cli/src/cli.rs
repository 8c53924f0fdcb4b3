//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's
//! derive macros. It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Meshprobe -- integration probe for the controller private gRPC API.
///
/// Use `meshprobe <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "meshprobe", version, about, long_about = None)]
pub struct Cli {
    /// Path to the meshprobe.toml configuration file.
    #[arg(short, long, default_value = "meshprobe.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the controller scenario (health, exercise, teardown).
    Run(RunArgs),
    /// Resolve and print the target topology without any network calls.
    Resolve(ResolveArgs),
    /// Validate or display the configuration.
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the deployment mode (api-gateway, localhost, direct).
    #[arg(long)]
    pub mode: Option<String>,

    /// Use fixed literal resource names instead of generated permalinks.
    #[arg(long)]
    pub fixed_names: bool,

    /// Pass-rate threshold required for a successful run.
    #[arg(long, default_value_t = 1.0)]
    pub threshold: f64,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Override the deployment mode (api-gateway, localhost, direct).
    #[arg(long)]
    pub mode: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Display the effective configuration (file + env overrides + defaults).
    Show {
        /// Section to display (general, target, fixtures).
        #[arg(long)]
        section: Option<String>,
    },
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-parseable JSON output.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_accepts_mode_and_threshold() {
        let cli = Cli::parse_from([
            "meshprobe",
            "run",
            "--mode",
            "localhost",
            "--threshold",
            "0.95",
        ]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.mode.as_deref(), Some("localhost"));
                assert!((args.threshold - 0.95).abs() < f64::EPSILON);
                assert!(!args.fixed_names);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn default_config_path_and_output() {
        let cli = Cli::parse_from(["meshprobe", "resolve"]);
        assert_eq!(cli.config, PathBuf::from("meshprobe.toml"));
        assert_eq!(cli.output, OutputFormat::Text);
    }
}
