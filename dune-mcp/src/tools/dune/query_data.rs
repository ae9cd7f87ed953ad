// Query Data Tool
//
// This tool fetches the latest results of a Dune query and returns the
// document exactly as Dune sent it.

use std::sync::Arc;
use async_trait::async_trait;
use serde_json::Value;

use crate::client::QueryResultsSource;
use crate::errors::ToolError;
use crate::protocol::CallToolResult;
use crate::tools::{Tool, ToolDefinition, ToolParameter, ToolResult};
use crate::tools::registry::ToolRegistry;

pub const TOOL_NAME: &str = "get_query_data";

/// Query Data Tool Implementation
pub struct QueryDataTool {
    source: Arc<dyn QueryResultsSource>,
}

impl QueryDataTool {
    /// Create a new query data tool backed by `source`
    pub fn new(source: Arc<dyn QueryResultsSource>) -> Self {
        Self { source }
    }

    /// Register this tool with the registry
    pub fn register(
        registry: &mut ToolRegistry,
        source: Arc<dyn QueryResultsSource>,
    ) -> Result<(), ToolError> {
        registry.register_tool(Arc::new(Self::new(source)))
    }
}

/// Extract `query_id`, accepting a non-empty string or an unsigned integer
fn query_id(params: &Value) -> Result<String, ToolError> {
    match params.get("query_id") {
        Some(Value::String(id)) if !id.trim().is_empty() => Ok(id.clone()),
        Some(Value::Number(n)) if n.is_u64() => Ok(n.to_string()),
        None | Some(Value::Null) | Some(Value::String(_)) => Err(ToolError::InvalidParameters(
            "Missing query_id parameter".to_string(),
        )),
        Some(_) => Err(ToolError::InvalidParameters(
            "query_id must be a string".to_string(),
        )),
    }
}

#[async_trait]
impl Tool for QueryDataTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: TOOL_NAME.to_string(),
            description: "Get data from a specific query_id".to_string(),
            parameters: vec![ToolParameter {
                name: "query_id".to_string(),
                description: "Query Id identifier".to_string(),
                required: true,
                parameter_type: "string".to_string(),
            }],
        }
    }

    async fn execute(&self, arguments: Value) -> ToolResult {
        self.validate_params(&arguments)?;
        let query_id = query_id(&arguments)?;

        let data = match self.source.query_results(&query_id).await {
            Ok(data) => data,
            Err(e) => {
                log::error!("Failed to fetch results for query_id {}: {}", query_id, e);
                return Err(e.into());
            }
        };
        log::debug!("Fetched results for query_id {}", query_id);

        CallToolResult::json(&data).map_err(|e| ToolError::ExecutionFailed(e.to_string()))
    }
}
