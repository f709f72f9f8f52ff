//! clean command - Delete every object in the bucket
//!
//! One listing call, then one bulk delete for every returned key. An empty
//! bucket short-circuits without a delete call. Buckets beyond the provider's
//! per-call listing limit are only partially cleaned per invocation.

use clap::Args;
use r2s_core::{ops, BucketStore as _, CleanSummary, Config};
use r2s_s3::R2Client;
use serde::Serialize;

use crate::commands::exit_for;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Delete every object in the bucket
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Only show what would be deleted (dry run)
    #[arg(long)]
    pub dry_run: bool,
}

/// Output structure for the clean command (JSON format)
#[derive(Debug, Serialize)]
struct CleanOutput {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    requested: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    keys: Vec<String>,
}

/// Execute the clean command
pub async fn execute(args: CleanArgs, config: &Config, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match R2Client::new(config).await {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to create R2 client: {e}"));
            return exit_for(&e);
        }
    };

    if args.dry_run {
        return dry_run(&client, &config.bucket, &formatter).await;
    }

    match ops::clean(&client, &config.bucket).await {
        Ok(CleanSummary::AlreadyEmpty) => {
            if formatter.is_json() {
                formatter.json(&CleanOutput {
                    status: "empty",
                    requested: None,
                    deleted: None,
                    keys: vec![],
                });
            } else {
                formatter.println("Bucket is already empty.");
            }
            ExitCode::Success
        }
        Ok(CleanSummary::Cleaned { requested, deleted }) => {
            if deleted < requested {
                formatter.warning(&format!(
                    "Provider confirmed {deleted} of {requested} deletions."
                ));
            }
            if formatter.is_json() {
                formatter.json(&CleanOutput {
                    status: "success",
                    requested: Some(requested),
                    deleted: Some(deleted),
                    keys: vec![],
                });
            } else {
                formatter.success(&format!("Bucket cleaned: removed {deleted} object(s)."));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to clean bucket: {e}"));
            exit_for(&e)
        }
    }
}

async fn dry_run(client: &R2Client, bucket: &str, formatter: &Formatter) -> ExitCode {
    match client.list_objects(bucket).await {
        Ok(entries) => {
            let keys: Vec<String> = entries.into_iter().map(|entry| entry.key).collect();

            if formatter.is_json() {
                formatter.json(&CleanOutput {
                    status: "dry-run",
                    requested: Some(keys.len()),
                    deleted: None,
                    keys,
                });
            } else if keys.is_empty() {
                formatter.println("Bucket is already empty.");
            } else {
                for key in &keys {
                    formatter.println(&format!("Would remove: {key}"));
                }
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to list objects: {e}"));
            exit_for(&e)
        }
    }
}
