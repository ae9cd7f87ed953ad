// API routes for the MCP server
//
// This file maps JSON-RPC method names onto the request handlers.

use crate::api::{handlers, Dispatcher};
use crate::protocol::{methods, JsonRpcError, JsonRpcRequest, JsonRpcResponse};

impl Dispatcher {
    /// Handle one JSON-RPC message.
    ///
    /// Returns `None` for notifications, which never get a response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let JsonRpcRequest { id, method, params, .. } = request;

        let Some(id) = id else {
            if method == methods::INITIALIZED {
                log::info!("Client initialization complete");
            } else {
                log::debug!("Ignoring notification {}", method);
            }
            return None;
        };

        let outcome = match method.as_str() {
            methods::INITIALIZE => handlers::lifecycle::initialize(params),
            methods::PING => handlers::lifecycle::ping(),
            methods::RESOURCES_LIST => handlers::resources::list(self),
            methods::RESOURCES_READ => handlers::resources::read(self, params),
            methods::TOOLS_LIST => handlers::tools::list(self),
            methods::TOOLS_CALL => handlers::tools::call(self, params).await,
            _ => Err(not_found(&method)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }
}

/// Error for unsupported methods
fn not_found(method: &str) -> JsonRpcError {
    log::warn!("Unsupported method {}", method);
    JsonRpcError::new(
        crate::protocol::error_codes::METHOD_NOT_FOUND,
        format!("Method not found: {}", method),
    )
}
