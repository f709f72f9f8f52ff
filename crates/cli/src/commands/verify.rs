//! verify command - Check credentials against the bucket
//!
//! Issues one lightweight probe and reports whether the configured
//! credentials can access the bucket. The outcome is always a result value;
//! classified failures are reflected in the exit code.

use r2s_core::{ops, Config};
use r2s_s3::R2Client;

use crate::commands::exit_for;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Execute the verify command
pub async fn execute(config: &Config, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match R2Client::new(config).await {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to create R2 client: {e}"));
            return exit_for(&e);
        }
    };

    let outcome = ops::verify(&client, &config.bucket).await;

    if formatter.is_json() {
        formatter.json(&outcome);
    } else if outcome.valid {
        formatter.success(&outcome.message);
    } else {
        formatter.error(&outcome.message);
    }

    match &outcome.kind {
        None if outcome.valid => ExitCode::Success,
        Some(kind) => ExitCode::from_i32(kind.exit_code()).unwrap_or(ExitCode::GeneralError),
        None => ExitCode::GeneralError,
    }
}
