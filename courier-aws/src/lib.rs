//! # Courier AWS
//!
//! AWS service adapters behind the courier's service ports.
//!
//! [`AwsServices`] holds one lazily-built client per service off a shared SDK
//! configuration; the adapter types wrap those clients behind the
//! `courier-core` traits:
//!
//! - [`AthenaEngine`] — `QueryEngine` over Athena
//! - [`DynamoStatusStore`] — `StatusStore` over a DynamoDB table with an
//!   execution-id secondary index
//! - [`S3LinkMinter`] — `LinkMinter` over S3 presigned GET URLs
//!
//! ```rust,ignore
//! let aws = AwsServices::new(AwsConfig::new().region("us-east-1")).await;
//! let engine = AthenaEngine::new(aws.athena());
//! let store = DynamoStatusStore::new(aws.dynamodb(), "query-status");
//! ```

mod config;
mod services;

pub mod athena;
pub mod dynamodb;
pub mod s3;

pub use athena::AthenaEngine;
pub use config::AwsConfig;
pub use dynamodb::DynamoStatusStore;
pub use s3::S3LinkMinter;
pub use services::AwsServices;

// Re-export AWS types for wiring code.
pub use aws_config;
pub use aws_sdk_sesv2;
