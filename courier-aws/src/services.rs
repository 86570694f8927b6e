//! AWS services container with lazy client construction.

use parking_lot::RwLock;
use tracing::info;

use crate::AwsConfig;

/// Container for the AWS service clients the courier uses.
///
/// Clients are built lazily off a shared SDK configuration and cached; SDK
/// clients are cheap handles, so accessors hand out clones.
pub struct AwsServices {
    config: AwsConfig,
    sdk_config: aws_config::SdkConfig,
    athena: RwLock<Option<aws_sdk_athena::Client>>,
    dynamodb: RwLock<Option<aws_sdk_dynamodb::Client>>,
    s3: RwLock<Option<aws_sdk_s3::Client>>,
    ses: RwLock<Option<aws_sdk_sesv2::Client>>,
}

impl AwsServices {
    /// Create a new services container.
    pub async fn new(config: AwsConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;

        info!(region = ?sdk_config.region(), "AWS services initialized");

        Self {
            config,
            sdk_config,
            athena: RwLock::new(None),
            dynamodb: RwLock::new(None),
            s3: RwLock::new(None),
            ses: RwLock::new(None),
        }
    }

    /// Get the SDK configuration.
    pub fn sdk_config(&self) -> &aws_config::SdkConfig {
        &self.sdk_config
    }

    /// Get the Athena client.
    pub fn athena(&self) -> aws_sdk_athena::Client {
        let mut client = self.athena.write();
        if client.is_none() {
            *client = Some(aws_sdk_athena::Client::new(&self.sdk_config));
            info!("Athena client initialized");
        }
        client.as_ref().unwrap().clone()
    }

    /// Get the DynamoDB client.
    pub fn dynamodb(&self) -> aws_sdk_dynamodb::Client {
        let mut client = self.dynamodb.write();
        if client.is_none() {
            *client = Some(aws_sdk_dynamodb::Client::new(&self.sdk_config));
            info!("DynamoDB client initialized");
        }
        client.as_ref().unwrap().clone()
    }

    /// Get the S3 client.
    pub fn s3(&self) -> aws_sdk_s3::Client {
        let mut client = self.s3.write();
        if client.is_none() {
            let mut builder = aws_sdk_s3::config::Builder::from(&self.sdk_config);
            if self.config.endpoint_url.is_some() {
                builder = builder.force_path_style(true);
            }
            *client = Some(aws_sdk_s3::Client::from_conf(builder.build()));
            info!("S3 client initialized");
        }
        client.as_ref().unwrap().clone()
    }

    /// Get the SES client.
    pub fn ses(&self) -> aws_sdk_sesv2::Client {
        let mut client = self.ses.write();
        if client.is_none() {
            *client = Some(aws_sdk_sesv2::Client::new(&self.sdk_config));
            info!("SES client initialized");
        }
        client.as_ref().unwrap().clone()
    }
}
