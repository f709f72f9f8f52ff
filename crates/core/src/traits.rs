//! BucketStore trait definition
//!
//! This trait defines the interface for the bucket operations the CLI needs.
//! It allows the operation logic to be decoupled from the specific S3 SDK
//! implementation and mocked in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Listing metadata for a single object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectEntry {
    /// Object key
    pub key: String,

    /// Size in bytes
    pub size_bytes: i64,

    /// Human-readable size
    pub size_human: String,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<jiff::Timestamp>,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl ObjectEntry {
    /// Create a new ObjectEntry with the given key and size
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes: size,
            size_human: humansize::format_size(size.max(0) as u64, humansize::BINARY),
            last_modified: None,
            etag: None,
        }
    }
}

/// Trait for the bucket operations the CLI performs
///
/// Implemented by the R2 adapter; mocked for operation-level tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BucketStore: Send + Sync {
    /// Probe the bucket with the cheapest call that still surfaces the
    /// provider's error code on failure.
    async fn check_bucket(&self, bucket: &str) -> Result<()>;

    /// List the bucket's objects with a single, non-paginated call.
    ///
    /// Buckets larger than the provider's per-call listing limit are
    /// returned truncated.
    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectEntry>>;

    /// Delete the named objects with one bulk request.
    ///
    /// Returns the keys the provider confirmed as deleted.
    async fn delete_objects(&self, bucket: &str, keys: Vec<String>) -> Result<Vec<String>>;
}
