// Tool handlers for the MCP server API
//
// This module contains handlers for tool-related methods, such as listing
// available tools and executing a tool.

use serde_json::{json, Value};

use crate::api::handlers::{parse_params, to_result, HandlerResult};
use crate::api::Dispatcher;
use crate::protocol::{CallToolParams, ListToolsResult};

/// Handler for `tools/list`
pub fn list(dispatcher: &Dispatcher) -> HandlerResult {
    to_result(ListToolsResult {
        tools: dispatcher.list_tools(),
    })
}

/// Handler for `tools/call`
pub async fn call(dispatcher: &Dispatcher, params: Option<Value>) -> HandlerResult {
    let CallToolParams { name, arguments } = parse_params(params)?;
    let arguments = arguments.unwrap_or_else(|| json!({}));

    match dispatcher.call_tool(&name, arguments).await {
        Ok(result) => to_result(result),
        Err(error) => {
            log::warn!("Tool '{}' failed: {}", name, error);
            Err(error.into_rpc_error(&name))
        }
    }
}
