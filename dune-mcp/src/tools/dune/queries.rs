// Dashboard Queries Tool
//
// This tool lists the Dune queries that back the Pumpfun dashboard.

use std::sync::Arc;
use async_trait::async_trait;
use serde_json::Value;

use crate::catalog;
use crate::errors::ToolError;
use crate::protocol::CallToolResult;
use crate::tools::{Tool, ToolDefinition, ToolResult};
use crate::tools::registry::ToolRegistry;

pub const TOOL_NAME: &str = "get_dashboard_queries";

/// Dashboard Queries Tool Implementation
pub struct DashboardQueriesTool;

impl DashboardQueriesTool {
    /// Register this tool with the registry
    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register_tool(Arc::new(Self))
    }
}

#[async_trait]
impl Tool for DashboardQueriesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: TOOL_NAME.to_string(),
            description: "get pumpfun Dune dashboard query_ids".to_string(),
            parameters: vec![],
        }
    }

    async fn execute(&self, _arguments: Value) -> ToolResult {
        let queries = serde_json::to_value(catalog::dashboard_queries())
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

        CallToolResult::json(&queries).map_err(|e| ToolError::ExecutionFailed(e.to_string()))
    }
}
