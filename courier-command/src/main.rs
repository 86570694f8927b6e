//! Command handler Lambda entry point.

use std::sync::Arc;

use courier_aws::{AthenaEngine, AwsConfig, AwsServices, DynamoStatusStore};
use courier_core::CourierConfig;
use courier_lambda::LambdaRequest;
use courier_lambda::lambda_http::{self, Error, Request, service_fn};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    courier_lambda::init_tracing();

    let config = Arc::new(CourierConfig::from_env()?);
    let aws = AwsServices::new(AwsConfig::new().region(config.region.clone())).await;

    let engine = AthenaEngine::new(aws.athena());
    let store = DynamoStatusStore::new(aws.dynamodb(), &config.table_name);
    let handler = Arc::new(courier_command::CommandHandler::new(
        config.clone(),
        engine,
        store,
    ));

    info!(
        output_bucket = %config.output_bucket,
        workgroup = %config.workgroup,
        "command handler ready"
    );

    lambda_http::run(service_fn(move |request: Request| {
        let handler = handler.clone();
        async move {
            let request = LambdaRequest::from_lambda_request(request);
            let response = handler.handle(&request).await;
            Ok::<_, Error>(response.into_lambda_response())
        }
    }))
    .await
}
