//! `s3://bucket/key` URI handling.

use std::fmt;

use thiserror::Error;
use url::Url;

/// Invalid S3 URI.
#[derive(Debug, Error)]
#[error("invalid s3 uri: {0}")]
pub struct S3UriError(pub String);

/// Parsed S3 object location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Uri {
    bucket: String,
    key: String,
}

impl S3Uri {
    /// Parse an `s3://bucket/path/to/object` URI.
    pub fn parse(input: &str) -> Result<Self, S3UriError> {
        let url = Url::parse(input).map_err(|e| S3UriError(format!("{input}: {e}")))?;
        if url.scheme() != "s3" {
            return Err(S3UriError(format!("{input}: scheme must be s3")));
        }
        let bucket = url
            .host_str()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| S3UriError(format!("{input}: missing bucket")))?;
        Ok(Self {
            bucket: bucket.to_string(),
            key: url.path().trim_start_matches('/').to_string(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for S3Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}
