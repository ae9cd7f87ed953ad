// Error handling module for the MCP server
//
// This module defines the error types used throughout the MCP server and
// the single mapping from tool failures to JSON-RPC error objects.

use thiserror::Error;

use crate::protocol::{error_codes, JsonRpcError};

/// Common error types for the MCP server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised by the Dune API client
#[derive(Error, Debug)]
pub enum DuneError {
    #[error("Invalid Dune API URL: {0}")]
    InvalidUrl(String),

    #[error("Dune API request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Dune API returned error status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse Dune API response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Tool-specific errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidParameters(String),

    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Tool registration failed: {0}")]
    RegistrationFailed(String),

    #[error(transparent)]
    External(#[from] DuneError),
}

/// Resource read errors
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Unknown resource: {0}")]
    NotFound(String),

    #[error("Failed to render resource: {0}")]
    Render(#[from] serde_json::Error),
}

impl ResourceError {
    /// JSON-RPC error code this failure is surfaced with
    pub fn code(&self) -> i32 {
        match self {
            ResourceError::NotFound(_) => error_codes::INVALID_PARAMS,
            ResourceError::Render(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

impl From<ResourceError> for JsonRpcError {
    fn from(error: ResourceError) -> Self {
        JsonRpcError {
            code: error.code(),
            message: error.to_string(),
            data: None,
        }
    }
}

impl ToolError {
    /// JSON-RPC error code this failure is surfaced with
    pub fn code(&self) -> i32 {
        match self {
            ToolError::NotFound(_) => error_codes::METHOD_NOT_FOUND,
            ToolError::InvalidParameters(_) => error_codes::INVALID_PARAMS,
            ToolError::ExecutionFailed(_)
            | ToolError::RegistrationFailed(_)
            | ToolError::External(_) => error_codes::INTERNAL_ERROR,
        }
    }

    /// Convert into the caller-facing error object for a call to `tool_name`.
    ///
    /// Validation and routing failures keep their message. Internal failures
    /// carry the tool name; upstream causes are logged, not echoed back.
    pub fn into_rpc_error(self, tool_name: &str) -> JsonRpcError {
        let code = self.code();
        let message = match &self {
            ToolError::NotFound(_) | ToolError::InvalidParameters(_) => self.to_string(),
            ToolError::External(_) => {
                format!("Tool '{}' failed: query service request failed", tool_name)
            }
            ToolError::ExecutionFailed(msg) | ToolError::RegistrationFailed(msg) => {
                format!("Tool '{}' failed: {}", tool_name, msg)
            }
        };

        JsonRpcError {
            code,
            message,
            data: None,
        }
    }
}
