//! Query state-change event shape.

use serde::{Deserialize, Serialize};

use courier_core::status::QueryState;

/// Event-bus source for query state changes.
pub const EVENT_SOURCE: &str = "aws.athena";

/// Event-bus detail type for query state changes.
pub const EVENT_DETAIL_TYPE: &str = "Athena Query State Change";

/// The `detail` payload of a query state-change event.
///
/// The upstream rule filters to transitions out of `RUNNING`, so
/// `previous_state` is informational here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryStateChangeDetail {
    pub query_execution_id: String,
    #[serde(default)]
    pub previous_state: Option<QueryState>,
    pub current_state: QueryState,
    #[serde(default)]
    pub workgroup_name: Option<String>,
}
