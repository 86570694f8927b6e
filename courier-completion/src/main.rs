//! Completion handler Lambda entry point.

use std::sync::Arc;

use aws_lambda_events::event::eventbridge::EventBridgeEvent;
use courier_aws::{AthenaEngine, AwsConfig, AwsServices, DynamoStatusStore, S3LinkMinter};
use courier_core::CourierConfig;
use courier_lambda::lambda_runtime::{self, Error, LambdaEvent, service_fn};
use courier_mail::SesTransport;
use tracing::{error, info, warn};

use courier_completion::{EVENT_DETAIL_TYPE, EVENT_SOURCE, QueryStateChangeDetail};

#[tokio::main]
async fn main() -> Result<(), Error> {
    courier_lambda::init_tracing();

    let config = Arc::new(CourierConfig::from_env()?);
    let aws = AwsServices::new(AwsConfig::new().region(config.region.clone())).await;

    let engine = AthenaEngine::new(aws.athena());
    let store = DynamoStatusStore::new(aws.dynamodb(), &config.table_name);
    let links = S3LinkMinter::new(aws.s3());
    let mailer = SesTransport::new(aws.ses());
    let handler = Arc::new(courier_completion::CompletionHandler::new(
        config.clone(),
        engine,
        store,
        links,
        mailer,
    ));

    info!(
        table = %config.table_name,
        sender = %config.sender_address,
        "completion handler ready"
    );

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<EventBridgeEvent<QueryStateChangeDetail>>| {
            let handler = handler.clone();
            async move {
                if event.payload.source != EVENT_SOURCE
                    || event.payload.detail_type != EVENT_DETAIL_TYPE
                {
                    warn!(
                        source = %event.payload.source,
                        detail_type = %event.payload.detail_type,
                        "unexpected event routed to the completion handler"
                    );
                }
                let detail = event.payload.detail;
                match handler.handle(&detail).await {
                    Ok(outcome) => {
                        info!(
                            execution_id = %detail.query_execution_id,
                            ?outcome,
                            "completion processed"
                        );
                        Ok(())
                    }
                    Err(err) => {
                        error!(
                            execution_id = %detail.query_execution_id,
                            fatal = err.is_fatal(),
                            error = %err,
                            "completion failed"
                        );
                        Err(Error::from(err))
                    }
                }
            }
        },
    ))
    .await
}
