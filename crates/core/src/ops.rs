//! Bucket operation logic
//!
//! The verify and clean operations over any [`BucketStore`]. Each is one
//! round trip (verify) or two sequential round trips (clean), with no retries
//! and no resumption.

use serde::Serialize;

use crate::error::{Error, RemoteError};
use crate::traits::BucketStore;

/// Message reported when the credential check succeeds
pub const CREDENTIALS_VALID: &str = "Credentials are valid.";

/// Outcome of a credential verification
///
/// Verification never escapes as an error: every failure is folded into an
/// invalid outcome whose message is the classified provider error.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VerifyOutcome {
    /// Whether the credentials could access the bucket
    pub valid: bool,

    /// Human-readable explanation
    pub message: String,

    /// The classified error kind behind an invalid outcome
    #[serde(skip)]
    pub kind: Option<RemoteError>,
}

impl VerifyOutcome {
    fn ok() -> Self {
        Self {
            valid: true,
            message: CREDENTIALS_VALID.to_string(),
            kind: None,
        }
    }

    fn invalid(message: String, kind: Option<RemoteError>) -> Self {
        Self {
            valid: false,
            message,
            kind,
        }
    }
}

/// Result of a clean operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanSummary {
    /// The bucket held no objects; no delete call was issued
    AlreadyEmpty,

    /// One bulk delete was issued for every listed key
    Cleaned {
        /// Keys named in the delete request
        requested: usize,
        /// Keys the provider confirmed as deleted
        deleted: usize,
    },
}

/// Check that the configured credentials can access the bucket.
pub async fn verify(store: &dyn BucketStore, bucket: &str) -> VerifyOutcome {
    match store.check_bucket(bucket).await {
        Ok(()) => VerifyOutcome::ok(),
        Err(Error::Remote(remote)) => VerifyOutcome::invalid(remote.to_string(), Some(remote)),
        Err(other) => VerifyOutcome::invalid(other.to_string(), None),
    }
}

/// Delete every object in the bucket.
///
/// One listing call, then one bulk delete naming every returned key. A bucket
/// beyond the provider's per-call listing limit is only partially cleaned.
pub async fn clean(store: &dyn BucketStore, bucket: &str) -> crate::Result<CleanSummary> {
    let entries = store.list_objects(bucket).await?;
    let keys: Vec<String> = entries.into_iter().map(|entry| entry.key).collect();

    if keys.is_empty() {
        return Ok(CleanSummary::AlreadyEmpty);
    }

    let requested = keys.len();
    let deleted = store.delete_objects(bucket, keys).await?;
    if deleted.len() < requested {
        tracing::warn!(
            requested,
            deleted = deleted.len(),
            "provider confirmed fewer deletions than requested"
        );
    }

    Ok(CleanSummary::Cleaned {
        requested,
        deleted: deleted.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockBucketStore, ObjectEntry};

    #[tokio::test]
    async fn test_verify_valid_credentials() {
        let mut store = MockBucketStore::new();
        store
            .expect_check_bucket()
            .times(1)
            .returning(|_| Ok(()));

        let outcome = verify(&store, "my-bucket").await;
        assert!(outcome.valid);
        assert_eq!(outcome.message, "Credentials are valid.");
        assert!(outcome.kind.is_none());
    }

    #[tokio::test]
    async fn test_verify_access_denied() {
        let mut store = MockBucketStore::new();
        store
            .expect_check_bucket()
            .returning(|_| Err(RemoteError::AccessDenied.into()));

        let outcome = verify(&store, "my-bucket").await;
        assert!(!outcome.valid);
        assert_eq!(
            outcome.message,
            "Access Denied. Invalid permissions or credentials."
        );
        assert_eq!(outcome.kind, Some(RemoteError::AccessDenied));
    }

    #[tokio::test]
    async fn test_verify_wrong_secret_key() {
        let mut store = MockBucketStore::new();
        store
            .expect_check_bucket()
            .returning(|_| Err(RemoteError::SignatureMismatch.into()));

        let outcome = verify(&store, "my-bucket").await;
        assert!(!outcome.valid);
        assert_eq!(outcome.message, "Invalid Secret Access Key.");
    }

    #[tokio::test]
    async fn test_verify_unknown_error_carries_raw_text() {
        let mut store = MockBucketStore::new();
        store
            .expect_check_bucket()
            .returning(|_| Err(RemoteError::Unknown("dns failure".into()).into()));

        let outcome = verify(&store, "my-bucket").await;
        assert!(!outcome.valid);
        assert_eq!(outcome.message, "Unknown error: dns failure");
    }

    #[tokio::test]
    async fn test_clean_issues_one_bulk_delete_for_all_keys() {
        let mut store = MockBucketStore::new();
        store.expect_list_objects().times(1).returning(|_| {
            Ok(vec![
                ObjectEntry::new("a.txt", 3),
                ObjectEntry::new("b.txt", 5),
            ])
        });
        store
            .expect_delete_objects()
            .withf(|bucket, keys| bucket == "my-bucket" && *keys == ["a.txt", "b.txt"])
            .times(1)
            .returning(|_, keys| Ok(keys));

        let summary = clean(&store, "my-bucket").await.unwrap();
        assert_eq!(
            summary,
            CleanSummary::Cleaned {
                requested: 2,
                deleted: 2
            }
        );
    }

    #[tokio::test]
    async fn test_clean_empty_bucket_skips_delete() {
        let mut store = MockBucketStore::new();
        store.expect_list_objects().times(1).returning(|_| Ok(vec![]));
        store.expect_delete_objects().never();

        let summary = clean(&store, "my-bucket").await.unwrap();
        assert_eq!(summary, CleanSummary::AlreadyEmpty);
    }

    #[tokio::test]
    async fn test_clean_reports_partial_confirmation() {
        let mut store = MockBucketStore::new();
        store.expect_list_objects().returning(|_| {
            Ok(vec![
                ObjectEntry::new("a.txt", 1),
                ObjectEntry::new("b.txt", 1),
            ])
        });
        store
            .expect_delete_objects()
            .returning(|_, _| Ok(vec!["a.txt".to_string()]));

        let summary = clean(&store, "my-bucket").await.unwrap();
        assert_eq!(
            summary,
            CleanSummary::Cleaned {
                requested: 2,
                deleted: 1
            }
        );
    }

    #[tokio::test]
    async fn test_clean_propagates_listing_failure() {
        let mut store = MockBucketStore::new();
        store
            .expect_list_objects()
            .returning(|_| Err(RemoteError::BucketNotFound.into()));
        store.expect_delete_objects().never();

        let err = clean(&store, "my-bucket").await.unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }
}
