// API handlers for the MCP server
//
// This module contains the request handlers for the MCP methods. Handlers
// turn JSON-RPC params into dispatcher calls and shape the result payload.

pub mod lifecycle;
pub mod resources;
pub mod tools;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::protocol::JsonRpcError;

/// Outcome of a single method handler
pub type HandlerResult = Result<Value, JsonRpcError>;

/// Deserialize required method params
pub(crate) fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))
}

/// Serialize a result payload
pub(crate) fn to_result<T: Serialize>(value: T) -> HandlerResult {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal(e.to_string()))
}
