//! Environment-derived configuration
//!
//! Deployment secrets are read once at process start into an immutable
//! `Config` struct that is passed explicitly to whichever operation handler
//! runs. Values are opaque strings; presence is the only check.

use crate::error::{Error, Result};

/// Environment variable holding the R2 access key ID
pub const ENV_ACCESS_KEY: &str = "ACCESS_KEY";
/// Environment variable holding the R2 secret access key
pub const ENV_SECRET_KEY: &str = "SECRET_KEY";
/// Environment variable holding the target bucket name
pub const ENV_BUCKET_NAME: &str = "BUCKET_NAME";
/// Environment variable holding the Cloudflare account identifier
pub const ENV_ACCOUNT_ID: &str = "ACCOUNT_ID";

/// Immutable per-invocation configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Access key ID
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,

    /// Cloudflare account identifier (forms the endpoint subdomain)
    pub account_id: String,

    /// Target bucket name
    pub bucket: String,
}

impl Config {
    /// Read the configuration from the process environment.
    ///
    /// Fails with a `Config` error naming every missing variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary lookup (useful for testing)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_key = lookup(ENV_ACCESS_KEY);
        let secret_key = lookup(ENV_SECRET_KEY);
        let bucket = lookup(ENV_BUCKET_NAME);
        let account_id = lookup(ENV_ACCOUNT_ID);

        match (access_key, secret_key, bucket, account_id) {
            (Some(access_key), Some(secret_key), Some(bucket), Some(account_id)) => Ok(Self {
                access_key,
                secret_key,
                account_id,
                bucket,
            }),
            (access_key, secret_key, bucket, account_id) => {
                let mut missing = Vec::new();
                if access_key.is_none() {
                    missing.push(ENV_ACCESS_KEY);
                }
                if secret_key.is_none() {
                    missing.push(ENV_SECRET_KEY);
                }
                if bucket.is_none() {
                    missing.push(ENV_BUCKET_NAME);
                }
                if account_id.is_none() {
                    missing.push(ENV_ACCOUNT_ID);
                }
                Err(Error::Config(format!(
                    "missing required environment variables: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env(&[
            (ENV_ACCESS_KEY, "AKIA123"),
            (ENV_SECRET_KEY, "shhh"),
            (ENV_BUCKET_NAME, "my-bucket"),
            (ENV_ACCOUNT_ID, "abc123"),
        ])
    }

    #[test]
    fn test_from_lookup_all_present() {
        let vars = full_env();
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.access_key, "AKIA123");
        assert_eq!(config.secret_key, "shhh");
        assert_eq!(config.bucket, "my-bucket");
        assert_eq!(config.account_id, "abc123");
    }

    #[test]
    fn test_from_lookup_one_missing() {
        let mut vars = full_env();
        vars.remove(ENV_SECRET_KEY);

        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains(ENV_SECRET_KEY));
        assert!(!err.to_string().contains(ENV_ACCESS_KEY));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_from_lookup_all_missing_names_each_var() {
        let err = Config::from_lookup(|_| None).unwrap_err();
        let message = err.to_string();
        for var in [ENV_ACCESS_KEY, ENV_SECRET_KEY, ENV_BUCKET_NAME, ENV_ACCOUNT_ID] {
            assert!(message.contains(var), "missing {var} in: {message}");
        }
    }

    #[test]
    fn test_from_lookup_empty_value_counts_as_present() {
        // Presence is the only check; empty strings are passed through.
        let mut vars = full_env();
        vars.insert(ENV_BUCKET_NAME.to_string(), String::new());

        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.bucket, "");
    }
}
