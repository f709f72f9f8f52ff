//! list command - List the bucket's objects
//!
//! One non-paginated listing call; entries are printed exactly as the
//! provider returned them, in order.

use clap::Args;
use r2s_core::{BucketStore as _, Config, ObjectEntry};
use r2s_s3::R2Client;
use serde::Serialize;

use crate::commands::exit_for;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// List the objects in the bucket
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show totals after the listing
    #[arg(long)]
    pub summarize: bool,
}

/// Output structure for the list command (JSON format)
#[derive(Debug, Serialize)]
struct ListOutput {
    items: Vec<ObjectEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
}

#[derive(Debug, Serialize)]
struct Summary {
    total_objects: usize,
    total_size_bytes: i64,
    total_size_human: String,
}

/// Execute the list command
pub async fn execute(args: ListArgs, config: &Config, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match R2Client::new(config).await {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to create R2 client: {e}"));
            return exit_for(&e);
        }
    };

    let entries = match client.list_objects(&config.bucket).await {
        Ok(entries) => entries,
        Err(e) => {
            formatter.error(&format!("Failed to list objects: {e}"));
            return exit_for(&e);
        }
    };

    let total_objects = entries.len();
    let total_size: i64 = entries.iter().map(|entry| entry.size_bytes).sum();

    if formatter.is_json() {
        let output = ListOutput {
            items: entries,
            summary: args.summarize.then(|| Summary {
                total_objects,
                total_size_bytes: total_size,
                total_size_human: humansize::format_size(
                    total_size.max(0) as u64,
                    humansize::BINARY,
                ),
            }),
        };
        formatter.json(&output);
    } else {
        for entry in &entries {
            formatter.println(&format_entry(entry));
        }

        if args.summarize {
            formatter.println(&format!(
                "\nTotal: {} objects, {}",
                total_objects,
                humansize::format_size(total_size.max(0) as u64, humansize::BINARY)
            ));
        }
    }

    ExitCode::Success
}

/// One listing line: timestamp, size, key
fn format_entry(entry: &ObjectEntry) -> String {
    let date = entry
        .last_modified
        .map(|d| d.strftime("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "                   ".to_string());
    format!("[{date}] {:>9} {}", entry.size_human, entry.key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_entry_without_timestamp() {
        let entry = ObjectEntry::new("a.txt", 3);
        let line = format_entry(&entry);
        assert!(line.ends_with("a.txt"));
        assert!(line.contains("3 B"));
    }

    #[test]
    fn test_format_entry_with_timestamp() {
        let mut entry = ObjectEntry::new("b.txt", 1024);
        entry.last_modified = Some(jiff::Timestamp::UNIX_EPOCH);
        let line = format_entry(&entry);
        assert!(line.starts_with("[1970-01-01 00:00:00]"));
        assert!(line.contains("1 KiB"));
    }
}
