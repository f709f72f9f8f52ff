//! Error types for r2s-core
//!
//! Provides a unified error type that can be converted to appropriate exit
//! codes, and the closed enumeration of remote error kinds the provider can
//! report.

use thiserror::Error;

/// Result type alias for r2s-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// A recognized error kind reported by the storage provider.
///
/// Unrecognized identifiers land in `Unknown`, which carries the raw provider
/// text so no information is lost. The Display form of each variant is the
/// message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Permissions or credential mismatch
    #[error("Access Denied. Invalid permissions or credentials.")]
    AccessDenied,

    /// Malformed or unknown access key
    #[error("Invalid Access Key.")]
    InvalidAccessKey,

    /// Secret key does not match the access key
    #[error("Invalid Secret Access Key.")]
    SignatureMismatch,

    /// The bucket does not exist
    #[error("Bucket not found.")]
    BucketNotFound,

    /// Anything the provider reported that we do not recognize
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl RemoteError {
    /// Map a provider-reported error identifier to a local variant.
    ///
    /// `code` is the identifier from the provider's error response (absent for
    /// failures that never reached the service, e.g. connection errors).
    /// `raw` is the full error text, kept verbatim in the catch-all.
    pub fn classify(code: Option<&str>, raw: impl Into<String>) -> Self {
        match code {
            Some("AccessDenied") => Self::AccessDenied,
            Some("InvalidAccessKeyId") => Self::InvalidAccessKey,
            Some("SignatureDoesNotMatch") => Self::SignatureMismatch,
            Some("NoSuchBucket") | Some("NotFound") => Self::BucketNotFound,
            _ => Self::Unknown(raw.into()),
        }
    }

    /// Get the appropriate exit code for this error kind
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::AccessDenied | Self::InvalidAccessKey | Self::SignatureMismatch => 4, // AuthError
            Self::BucketNotFound => 5, // NotFound
            Self::Unknown(_) => 3,     // NetworkError
        }
    }
}

/// Error types for r2s-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing environment variables)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure reported by (or while reaching) the storage provider
    #[error("{0}")]
    Remote(#[from] RemoteError),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 1, // missing secrets terminate with status 1
            Error::Remote(remote) => remote.exit_code(),
            Error::General(_) => 1,
        }
    }
}
