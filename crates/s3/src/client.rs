//! R2 client implementation
//!
//! Wraps aws-sdk-s3 and implements the BucketStore trait from r2s-core.
//! Cloudflare R2 serves buckets on a per-account subdomain and requires
//! path-style addressing; the region is the fixed placeholder "auto".

use async_trait::async_trait;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_smithy_types::error::display::DisplayErrorContext;
use url::Url;

use r2s_core::{BucketStore, Config, Error, ObjectEntry, RemoteError, Result};

/// Placeholder region R2 expects
const R2_REGION: &str = "auto";

/// R2 client wrapper
pub struct R2Client {
    inner: aws_sdk_s3::Client,
}

impl R2Client {
    /// Create a new R2 client bound to the account's endpoint
    pub async fn new(config: &Config) -> Result<Self> {
        let endpoint = endpoint_url(&config.account_id)?;

        let credentials = aws_credential_types::Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None, // session token
            None, // expiry
            "r2s-static-credentials",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(R2_REGION))
            .endpoint_url(endpoint.as_str())
            .load()
            .await;

        // R2 rejects virtual-hosted-style bucket addressing
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

#[async_trait]
impl BucketStore for R2Client {
    async fn check_bucket(&self, bucket: &str) -> Result<()> {
        // A capped listing rather than HeadBucket: R2 answers HEAD failures
        // without an error body, which would erase the provider error code
        // the classification needs.
        self.inner
            .list_objects_v2()
            .bucket(bucket)
            .max_keys(1)
            .send()
            .await
            .map_err(classify_error)?;

        Ok(())
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectEntry>> {
        let response = self
            .inner
            .list_objects_v2()
            .bucket(bucket)
            .send()
            .await
            .map_err(classify_error)?;

        if response.is_truncated().unwrap_or(false) {
            tracing::warn!(bucket, "listing truncated at the provider's per-call limit");
        }

        let entries = response
            .contents()
            .iter()
            .map(|object| {
                let key = object.key().unwrap_or_default().to_string();
                let size = object.size().unwrap_or(0);
                let mut entry = ObjectEntry::new(key, size);

                if let Some(modified) = object.last_modified() {
                    entry.last_modified = jiff::Timestamp::from_second(modified.secs()).ok();
                }

                if let Some(etag) = object.e_tag() {
                    entry.etag = Some(etag.trim_matches('"').to_string());
                }

                entry
            })
            .collect();

        Ok(entries)
    }

    async fn delete_objects(&self, bucket: &str, keys: Vec<String>) -> Result<Vec<String>> {
        use aws_sdk_s3::types::{Delete, ObjectIdentifier};

        if keys.is_empty() {
            return Ok(vec![]);
        }

        let objects = keys
            .iter()
            .map(|k| ObjectIdentifier::builder().key(k).build())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::General(e.to_string()))?;

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .build()
            .map_err(|e| Error::General(e.to_string()))?;

        let response = self
            .inner
            .delete_objects()
            .bucket(bucket)
            .delete(delete)
            .send()
            .await
            .map_err(classify_error)?;

        let deleted: Vec<String> = response
            .deleted()
            .iter()
            .filter_map(|d| d.key().map(|k| k.to_string()))
            .collect();

        if !response.errors().is_empty() {
            let failed: Vec<String> = response
                .errors()
                .iter()
                .filter_map(|e| e.key().map(|k| k.to_string()))
                .collect();
            tracing::warn!("failed to delete some objects: {:?}", failed);
        }

        Ok(deleted)
    }
}

/// Build the per-account R2 endpoint URL
fn endpoint_url(account_id: &str) -> Result<Url> {
    let raw = format!("https://{account_id}.r2.cloudflarestorage.com");
    Url::parse(&raw).map_err(|e| Error::Config(format!("invalid endpoint '{raw}': {e}")))
}

/// Map an SDK error to the local taxonomy via the provider error code
fn classify_error<E, R>(err: SdkError<E, R>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    let code = err.code().map(str::to_owned);
    let raw = DisplayErrorContext(&err).to_string();
    Error::Remote(RemoteError::classify(code.as_deref(), raw))
}
