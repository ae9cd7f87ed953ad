// Tool registry module
//
// This module defines the tool registry system which manages tool registration
// and discovery for the MCP server.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use serde::{Serialize, Deserialize};
use serde_json::{json, Map, Value};

use crate::errors::ToolError;
use crate::protocol::CallToolResult;

/// ToolParameter defines a parameter for a tool
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Name of the parameter
    pub name: String,
    /// Description of the parameter
    pub description: String,
    /// Whether the parameter is required
    pub required: bool,
    /// Type of the parameter (string, number, boolean, object, array)
    pub parameter_type: String,
}

/// ToolDefinition defines a tool available in the MCP server
#[derive(Clone, Debug)]
pub struct ToolDefinition {
    /// Name of the tool
    pub name: String,
    /// Description of the tool
    pub description: String,
    /// Parameters for the tool
    pub parameters: Vec<ToolParameter>,
}

impl ToolDefinition {
    /// Render the parameters as a JSON Schema object
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|param| {
                (
                    param.name.clone(),
                    json!({
                        "type": param.parameter_type,
                        "description": param.description,
                    }),
                )
            })
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Wire form listed by `tools/list`
    pub fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.input_schema(),
        }
    }
}

/// Tool as advertised to MCP clients
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Type alias for tool execution results
pub type ToolResult = Result<CallToolResult, ToolError>;

/// Tool trait for implementing tool functionality
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool definition
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool with the given arguments
    async fn execute(&self, arguments: Value) -> ToolResult;

    /// Validate the arguments against the tool definition
    fn validate_params(&self, params: &Value) -> Result<(), ToolError> {
        let map = params.as_object().ok_or_else(|| {
            ToolError::InvalidParameters("Parameters must be an object".to_string())
        })?;

        for param in self.definition().parameters.iter().filter(|p| p.required) {
            if map.get(&param.name).map_or(true, Value::is_null) {
                return Err(ToolError::InvalidParameters(format!(
                    "Missing {} parameter",
                    param.name
                )));
            }
        }

        Ok(())
    }
}

/// ToolRegistry maps tool names to their handlers.
///
/// Populated once at startup and read-only afterwards; listing preserves
/// registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool with the registry
    pub fn register_tool(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.definition().name;

        if self.tools.contains_key(&name) {
            return Err(ToolError::RegistrationFailed(
                format!("Tool with name '{}' already registered", name)
            ));
        }

        self.order.push(name.clone());
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all registered tools
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.definition())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
