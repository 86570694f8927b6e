//! S3 presigned download links.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use tracing::debug;

use courier_core::error::LinkError;
use courier_core::link::LinkMinter;
use courier_core::s3uri::S3Uri;

/// [`LinkMinter`] over S3 presigned GET requests.
pub struct S3LinkMinter {
    client: Client,
}

impl S3LinkMinter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LinkMinter for S3LinkMinter {
    async fn mint(&self, location: &S3Uri, ttl: Duration) -> Result<String, LinkError> {
        let presigning = PresigningConfig::expires_in(ttl)
            .map_err(|e| LinkError::Presign(e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(location.bucket())
            .key(location.key())
            .presigned(presigning)
            .await
            .map_err(|e| LinkError::Presign(DisplayErrorContext(&e).to_string()))?;

        debug!(location = %location, ttl_seconds = ttl.as_secs(), "minted download link");
        Ok(presigned.uri().to_string())
    }
}
