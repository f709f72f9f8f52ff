//! CLI command definitions and execution
//!
//! One action per invocation: verify, list, or clean. The environment-derived
//! configuration is read once here, before any network call, and passed
//! explicitly to the command that runs.

use clap::{Parser, Subcommand};

use r2s_core::{Config, Error};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod clean;
mod completions;
mod list;
mod verify;

/// r2s - Cloudflare R2 bucket utility
///
/// Verifies credentials against, lists, and cleans a Cloudflare R2 bucket.
/// Credentials come from the ACCESS_KEY, SECRET_KEY, BUCKET_NAME, and
/// ACCOUNT_ID environment variables.
#[derive(Parser, Debug)]
#[command(name = "r2s")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the configured credentials can access the bucket
    Verify,

    /// List the objects in the bucket
    List(list::ListArgs),

    /// Delete every object in the bucket
    Clean(clean::CleanArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    // Completions need no configuration and must work without it.
    if let Commands::Completions(args) = &cli.command {
        return completions::execute(args);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            Formatter::new(output_config.clone()).error(&e.to_string());
            return exit_for(&e);
        }
    };

    match cli.command {
        Commands::Verify => verify::execute(&config, output_config).await,
        Commands::List(args) => list::execute(args, &config, output_config).await,
        Commands::Clean(args) => clean::execute(args, &config, output_config).await,
        Commands::Completions(_) => ExitCode::Success, // handled above
    }
}

/// Map a core error to the CLI exit-code contract
pub(crate) fn exit_for(err: &Error) -> ExitCode {
    ExitCode::from_i32(err.exit_code()).unwrap_or(ExitCode::GeneralError)
}
