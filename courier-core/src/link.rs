//! Time-limited download link port.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::LinkError;
use crate::s3uri::S3Uri;

/// Mints time-limited access links to result objects.
#[async_trait]
pub trait LinkMinter: Send + Sync {
    /// Mint a link to `location` valid for `ttl`.
    async fn mint(&self, location: &S3Uri, ttl: Duration) -> Result<String, LinkError>;
}

#[async_trait]
impl<T: LinkMinter + ?Sized> LinkMinter for std::sync::Arc<T> {
    async fn mint(&self, location: &S3Uri, ttl: Duration) -> Result<String, LinkError> {
        (**self).mint(location, ttl).await
    }
}
