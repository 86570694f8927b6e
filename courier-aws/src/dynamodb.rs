//! DynamoDB status store adapter.
//!
//! Table layout: partition key `requester_id` (S), attributes `execution_id`
//! (S), `query_status` (S) and `expires_at` (N, the table's TTL attribute),
//! plus a keys-only global secondary index on `execution_id`.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;

use courier_core::error::StoreError;
use courier_core::status::{QueryState, RecordKey, StatusRecord};
use courier_core::store::{Lookup, StatusStore, UpdateOutcome};

const REQUESTER_ATTR: &str = "requester_id";
const EXECUTION_ATTR: &str = "execution_id";
const STATUS_ATTR: &str = "query_status";
const EXPIRES_ATTR: &str = "expires_at";

/// Default name of the execution-id secondary index.
pub const DEFAULT_INDEX_NAME: &str = "execution_id-index";

/// [`StatusStore`] over a DynamoDB table.
pub struct DynamoStatusStore {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DynamoStatusStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
        }
    }

    /// Override the secondary index name.
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }
}

fn item_from_record(record: &StatusRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            REQUESTER_ATTR.to_string(),
            AttributeValue::S(record.requester_id.clone()),
        ),
        (
            EXECUTION_ATTR.to_string(),
            AttributeValue::S(record.execution_id.clone()),
        ),
        (
            STATUS_ATTR.to_string(),
            AttributeValue::S(record.status.to_string()),
        ),
        (
            EXPIRES_ATTR.to_string(),
            AttributeValue::N(record.expires_at.to_string()),
        ),
    ])
}

fn string_attr(
    item: &HashMap<String, AttributeValue>,
    name: &'static str,
) -> Result<String, StoreError> {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .cloned()
        .ok_or(StoreError::MalformedItem(name))
}

fn key_from_item(item: &HashMap<String, AttributeValue>) -> Result<RecordKey, StoreError> {
    Ok(RecordKey {
        requester_id: string_attr(item, REQUESTER_ATTR)?,
        execution_id: string_attr(item, EXECUTION_ATTR)?,
    })
}

#[async_trait]
impl StatusStore for DynamoStatusStore {
    async fn put(&self, record: StatusRecord) -> Result<(), StoreError> {
        debug!(
            requester_id = %record.requester_id,
            execution_id = %record.execution_id,
            "writing status record"
        );
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_from_record(&record)))
            .send()
            .await
            .map_err(|e| StoreError::Request(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    async fn find_by_execution_id(&self, execution_id: &str) -> Result<Lookup, StoreError> {
        let response = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.index_name)
            .key_condition_expression("execution_id = :eid")
            .expression_attribute_values(":eid", AttributeValue::S(execution_id.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Request(DisplayErrorContext(&e).to_string()))?;

        let items = response.items();
        match items {
            [] => Ok(Lookup::Missing),
            [item] => Ok(Lookup::Unique(key_from_item(item)?)),
            many => Ok(Lookup::Ambiguous(many.len())),
        }
    }

    async fn update_status(
        &self,
        requester_id: &str,
        execution_id: &str,
        next: QueryState,
    ) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(REQUESTER_ATTR, AttributeValue::S(requester_id.to_string()))
            .update_expression("SET query_status = :next")
            .condition_expression("execution_id = :eid")
            .expression_attribute_values(":next", AttributeValue::S(next.to_string()))
            .expression_attribute_values(":eid", AttributeValue::S(execution_id.to_string()))
            .send()
            .await;

        match result {
            Ok(_) => Ok(UpdateOutcome::Applied),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception()) =>
            {
                Ok(UpdateOutcome::Superseded)
            }
            Err(err) => Err(StoreError::Request(DisplayErrorContext(&err).to_string())),
        }
    }
}
