//! AWS client configuration.

/// Configuration for [`AwsServices`](crate::AwsServices).
///
/// Credentials always come from the default provider chain (the handlers run
/// under an execution role).
#[derive(Debug, Clone, Default)]
pub struct AwsConfig {
    /// AWS region; falls back to the SDK's own resolution when unset.
    pub region: Option<String>,
    /// Custom endpoint URL (for LocalStack and friends).
    pub endpoint_url: Option<String>,
}

impl AwsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set a custom endpoint URL.
    pub fn endpoint_url(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint.into());
        self
    }
}
