//! Cold-start configuration.
//!
//! Both handlers read their configuration once at process start and pass it
//! into the handler by `Arc`; nothing reads the environment per request. A
//! missing required value is a startup failure, never a per-request one.

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_WORKGROUP: &str = "primary";
const DEFAULT_LINK_TTL_SECONDS: u64 = 3600;

const REGION_VAR: &str = "REGION_NAME";
const OUTPUT_BUCKET_VAR: &str = "ATHENA_OUTPUT_BUCKET_NAME";
const WORKGROUP_VAR: &str = "ATHENA_WORKGROUP_NAME";
const TABLE_VAR: &str = "STATUS_TABLE_NAME";
const SENDER_VAR: &str = "EMAIL_FROM_ADDRESS";
const LINK_TTL_VAR: &str = "DOWNLOAD_URL_TTL";

/// Configuration shared by the command and completion handlers.
#[derive(Debug, Clone)]
pub struct CourierConfig {
    /// AWS region for every service client.
    pub region: String,
    /// The only bucket submissions may declare as their output location.
    pub output_bucket: String,
    /// The only workgroup submissions may run in (and the default when a
    /// submission names none).
    pub workgroup: String,
    /// Status store table name.
    pub table_name: String,
    /// Notification sender, also the degraded-mode fallback recipient.
    pub sender_address: String,
    /// Lifetime of minted download links.
    pub link_ttl: Duration,
}

impl CourierConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary lookup.
    ///
    /// `std::env::set_var` is unsafe under the 2024 edition and not
    /// thread-safe, so tests inject a lookup instead of mutating the
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::MissingVar(name));

        let link_ttl = match lookup(LINK_TTL_VAR) {
            None => DEFAULT_LINK_TTL_SECONDS,
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                var: LINK_TTL_VAR,
                value: raw,
            })?,
        };

        Ok(Self {
            region: lookup(REGION_VAR).unwrap_or_else(|| DEFAULT_REGION.to_string()),
            output_bucket: required(OUTPUT_BUCKET_VAR)?,
            workgroup: lookup(WORKGROUP_VAR).unwrap_or_else(|| DEFAULT_WORKGROUP.to_string()),
            table_name: required(TABLE_VAR)?,
            sender_address: required(SENDER_VAR)?,
            link_ttl: Duration::from_secs(link_ttl),
        })
    }
}
