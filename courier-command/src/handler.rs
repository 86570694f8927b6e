//! The command handler.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use courier_core::config::CourierConfig;
use courier_core::engine::{QueryEngine, QuerySubmission, SubmissionAck};
use courier_core::s3uri::S3Uri;
use courier_core::status::StatusRecord;
use courier_core::store::StatusStore;
use courier_lambda::{LambdaRequest, LambdaResponse};

use crate::CommandError;

/// Query-string parameter carrying the requester identity.
const REQUESTER_PARAM: &str = "user";

/// Accepts a submission, forwards it to the engine, and records the initial
/// status.
pub struct CommandHandler<E, S> {
    config: Arc<CourierConfig>,
    engine: E,
    store: S,
}

impl<E, S> CommandHandler<E, S>
where
    E: QueryEngine,
    S: StatusStore,
{
    pub fn new(config: Arc<CourierConfig>, engine: E, store: S) -> Self {
        Self {
            config,
            engine,
            store,
        }
    }

    /// Handle one submission request.
    pub async fn handle(&self, request: &LambdaRequest) -> LambdaResponse {
        match self.submit(request).await {
            Ok(ack) => LambdaResponse::json(&ack)
                .unwrap_or_else(|e| LambdaResponse::internal_error(e.to_string())),
            Err(err) => {
                warn!(status = err.status_code(), error = %err, "submission rejected");
                LambdaResponse::error(err.status_code(), err.to_string())
            }
        }
    }

    /// Validate, submit to the engine, then record the QUEUED status.
    ///
    /// The engine submission must precede the store write (the record needs
    /// the execution id the engine assigns). A store failure after a
    /// successful submission reports failure with the query already in
    /// flight; there is no compensating cancellation.
    async fn submit(&self, request: &LambdaRequest) -> Result<SubmissionAck, CommandError> {
        if request.method != http::Method::POST {
            return Err(CommandError::MethodNotAllowed);
        }

        let submission: QuerySubmission = request
            .json_body()
            .map_err(|e| CommandError::MalformedBody(e.to_string()))?;

        let location = S3Uri::parse(&submission.result_configuration.output_location)
            .map_err(|_| CommandError::InvalidOutputLocation)?;
        if location.bucket() != self.config.output_bucket {
            return Err(CommandError::InvalidOutputLocation);
        }

        let workgroup = submission
            .work_group
            .as_deref()
            .unwrap_or(&self.config.workgroup);
        if workgroup != self.config.workgroup {
            return Err(CommandError::InvalidWorkgroup);
        }

        let requester = request
            .query_param(REQUESTER_PARAM)
            .ok_or(CommandError::MissingRequester)?;

        let ack = self.engine.submit(&submission).await?;
        info!(
            requester_id = %requester,
            execution_id = %ack.query_execution_id,
            "query submitted"
        );

        let record = StatusRecord::queued(requester, &ack.query_execution_id, Utc::now());
        self.store.put(record).await?;

        Ok(ack)
    }
}
