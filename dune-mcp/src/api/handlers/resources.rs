// Resource handlers for the MCP server
//
// Listing and reading the static dashboard resources.

use serde_json::Value;

use crate::api::handlers::{parse_params, to_result, HandlerResult};
use crate::api::Dispatcher;
use crate::protocol::{ListResourcesResult, ReadResourceParams};

/// Handler for `resources/list`
pub fn list(dispatcher: &Dispatcher) -> HandlerResult {
    to_result(ListResourcesResult {
        resources: dispatcher.list_resources(),
    })
}

/// Handler for `resources/read`
pub fn read(dispatcher: &Dispatcher, params: Option<Value>) -> HandlerResult {
    let params: ReadResourceParams = parse_params(params)?;
    match dispatcher.read_resource(&params.uri) {
        Ok(result) => to_result(result),
        Err(error) => {
            log::warn!("Failed to read resource {}: {}", params.uri, error);
            Err(error.into())
        }
    }
}
