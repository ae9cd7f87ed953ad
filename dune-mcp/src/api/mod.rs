// API module for the MCP server
//
// This module contains the request dispatcher, the JSON-RPC method routes,
// and the stdio transport that feeds them.

mod routes;
pub mod handlers;
pub mod transport;

#[cfg(test)]
mod tests;

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use serde_json::{json, Value};

use crate::catalog::{self, ResourceDescriptor};
use crate::errors::{ResourceError, ServerError, ToolError};
use crate::protocol::{CallToolResult, ReadResourceResult, ResourceContents};
use crate::tools::{ToolDescriptor, ToolRegistry};

/// Routes MCP requests to the catalogs and the tool registry.
///
/// Holds no per-request state, so one instance is shared by every in-flight
/// request.
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Every resource in the catalog
    pub fn list_resources(&self) -> Vec<ResourceDescriptor> {
        catalog::resources().to_vec()
    }

    /// Read the contents of a catalog resource
    pub fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let resource = catalog::find_resource(uri)
            .ok_or_else(|| ResourceError::NotFound(uri.to_string()))?;

        let text = serde_json::to_string_pretty(catalog::dashboard_queries())?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents {
                uri: resource.uri.clone(),
                mime_type: resource.mime_type.clone(),
                text,
            }],
        })
    }

    /// Every registered tool with its input schema
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.registry
            .list_tools()
            .iter()
            .map(|definition| definition.descriptor())
            .collect()
    }

    /// Invoke the tool registered under `name`.
    ///
    /// Handler failures are returned unchanged. A panicking handler is
    /// reported as `ExecutionFailed`.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<CallToolResult, ToolError> {
        let tool = self
            .registry
            .get_tool(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        match AssertUnwindSafe(tool.execute(arguments)).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => {
                let reason = panic_message(panic.as_ref());
                log::error!("Tool '{}' panicked: {}", name, reason);
                Err(ToolError::ExecutionFailed("unexpected internal error".to_string()))
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Serve MCP over stdin/stdout until the input closes
pub async fn init_server(dispatcher: Arc<Dispatcher>) -> Result<(), ServerError> {
    log::info!("{} listening on stdio", crate::SERVER_NAME);
    transport::serve(dispatcher, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Server information returned from `initialize`
pub fn server_info() -> Value {
    json!({
        "protocolVersion": crate::MCP_VERSION,
        "capabilities": {
            "resources": {},
            "tools": {},
        },
        "serverInfo": {
            "name": crate::SERVER_NAME,
            "version": crate::SERVER_VERSION,
        },
    })
}
