// Tools module for the MCP server
//
// This module implements the tool registration and execution system
// for the MCP server.

pub mod dune;
mod registry;

pub use registry::{ToolRegistry, Tool, ToolDefinition, ToolDescriptor, ToolParameter, ToolResult};

use std::sync::Arc;
use crate::client::QueryResultsSource;
use crate::errors::ToolError;

/// Initialize the tool registry
pub fn init_registry(
    source: Arc<dyn QueryResultsSource>,
) -> Result<Arc<ToolRegistry>, ToolError> {
    let mut registry = ToolRegistry::new();

    // Register Dune query tools
    dune::register_tools(&mut registry, source)?;

    Ok(Arc::new(registry))
}
