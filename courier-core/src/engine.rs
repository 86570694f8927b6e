//! Query engine port and its wire types.
//!
//! The submission body is the engine's own PascalCase wire shape; the command
//! handler accepts it from the client and passes it through verbatim.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::s3uri::S3Uri;

/// A query submission, in the engine's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuerySubmission {
    pub query_string: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_execution_context: Option<QueryContext>,
    pub result_configuration: ResultConfiguration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_group: Option<String>,
}

/// Execution context for a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

/// Where the engine should write the result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultConfiguration {
    pub output_location: String,
}

/// The engine's acknowledgement of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubmissionAck {
    pub query_execution_id: String,
}

/// The external query engine.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Submit a query; the engine assigns and returns an execution id.
    async fn submit(&self, submission: &QuerySubmission) -> Result<SubmissionAck, EngineError>;

    /// Fetch the recorded result location for a finished execution.
    async fn result_location(&self, execution_id: &str) -> Result<S3Uri, EngineError>;
}

#[async_trait]
impl<T: QueryEngine + ?Sized> QueryEngine for std::sync::Arc<T> {
    async fn submit(&self, submission: &QuerySubmission) -> Result<SubmissionAck, EngineError> {
        (**self).submit(submission).await
    }

    async fn result_location(&self, execution_id: &str) -> Result<S3Uri, EngineError> {
        (**self).result_location(execution_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_parses_from_engine_wire_shape() {
        let body = r#"{
            "QueryString": "SELECT dt, impressionid FROM impressions LIMIT 100",
            "QueryExecutionContext": {"Database": "hive_ads"},
            "ResultConfiguration": {"OutputLocation": "s3://results-bucket/athena"},
            "WorkGroup": "primary"
        }"#;
        let submission: QuerySubmission = serde_json::from_str(body).unwrap();
        assert_eq!(
            submission.query_execution_context.unwrap().database.as_deref(),
            Some("hive_ads")
        );
        assert_eq!(
            submission.result_configuration.output_location,
            "s3://results-bucket/athena"
        );
        assert_eq!(submission.work_group.as_deref(), Some("primary"));
    }

    #[test]
    fn context_and_workgroup_are_optional() {
        let body = r#"{
            "QueryString": "SELECT 1",
            "ResultConfiguration": {"OutputLocation": "s3://results-bucket/x"}
        }"#;
        let submission: QuerySubmission = serde_json::from_str(body).unwrap();
        assert!(submission.query_execution_context.is_none());
        assert!(submission.work_group.is_none());
    }

    #[test]
    fn ack_serializes_with_engine_field_name() {
        let ack = SubmissionAck {
            query_execution_id: "exec-1".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&ack).unwrap(),
            r#"{"QueryExecutionId":"exec-1"}"#
        );
    }
}
