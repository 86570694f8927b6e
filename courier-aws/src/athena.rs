//! Athena query engine adapter.

use async_trait::async_trait;
use aws_sdk_athena::Client;
use aws_sdk_athena::error::DisplayErrorContext;
use aws_sdk_athena::types::{QueryExecutionContext, ResultConfiguration};
use tracing::debug;

use courier_core::engine::{QueryEngine, QuerySubmission, SubmissionAck};
use courier_core::error::EngineError;
use courier_core::s3uri::S3Uri;

/// [`QueryEngine`] over AWS Athena.
pub struct AthenaEngine {
    client: Client,
}

impl AthenaEngine {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QueryEngine for AthenaEngine {
    async fn submit(&self, submission: &QuerySubmission) -> Result<SubmissionAck, EngineError> {
        debug!(
            output_location = %submission.result_configuration.output_location,
            work_group = ?submission.work_group,
            "starting query execution"
        );

        let context = submission.query_execution_context.as_ref().map(|ctx| {
            QueryExecutionContext::builder()
                .set_database(ctx.database.clone())
                .build()
        });

        let response = self
            .client
            .start_query_execution()
            .query_string(&submission.query_string)
            .set_query_execution_context(context)
            .result_configuration(
                ResultConfiguration::builder()
                    .output_location(&submission.result_configuration.output_location)
                    .build(),
            )
            .set_work_group(submission.work_group.clone())
            .send()
            .await
            .map_err(|e| EngineError::Request(DisplayErrorContext(&e).to_string()))?;

        let query_execution_id = response
            .query_execution_id()
            .ok_or(EngineError::MissingField("QueryExecutionId"))?
            .to_string();

        Ok(SubmissionAck { query_execution_id })
    }

    async fn result_location(&self, execution_id: &str) -> Result<S3Uri, EngineError> {
        let response = self
            .client
            .get_query_execution()
            .query_execution_id(execution_id)
            .send()
            .await
            .map_err(|e| EngineError::Request(DisplayErrorContext(&e).to_string()))?;

        let location = response
            .query_execution()
            .and_then(|execution| execution.result_configuration())
            .and_then(|configuration| configuration.output_location())
            .ok_or(EngineError::MissingField("ResultConfiguration.OutputLocation"))?;

        S3Uri::parse(location)
            .map_err(|_| EngineError::MissingField("valid s3 output location"))
    }
}
