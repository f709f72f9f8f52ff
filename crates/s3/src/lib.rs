//! r2s-s3: Cloudflare R2 adapter for the r2s CLI
//!
//! This crate provides the implementation of the BucketStore trait
//! using the aws-sdk-s3 crate. It is the only crate that directly
//! depends on the AWS SDK.

pub mod client;

pub use client::R2Client;
