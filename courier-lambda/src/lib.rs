//! # Courier Lambda
//!
//! AWS Lambda adapters for the courier handlers: a plain
//! [`LambdaRequest`]/[`LambdaResponse`] pair for the API Gateway proxy
//! integration, and CloudWatch-friendly tracing setup shared by both
//! binaries.

mod request;
mod response;

pub use request::LambdaRequest;
pub use response::LambdaResponse;

// Re-export lambda types for the binaries.
pub use lambda_http;
pub use lambda_runtime;

/// Initialize tracing for Lambda/CloudWatch.
///
/// Structured JSON logging with flattened events, filter from
/// `RUST_LOG` with an `info` default.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
        .init();
}
