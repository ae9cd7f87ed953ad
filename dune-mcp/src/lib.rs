// dune-mcp: Model Context Protocol Server for Dune analytics data
//
// This library implements a Model Context Protocol (MCP) server which lets
// AI agents discover the Pumpfun dashboard queries on Dune and fetch their
// latest results over a stdio JSON-RPC transport.

pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod errors;
pub mod protocol;
pub mod tools;

/// Name reported to clients in the `initialize` handshake
pub const SERVER_NAME: &str = "dune-data-server";

/// Version reported to clients in the `initialize` handshake
pub const SERVER_VERSION: &str = "0.1.0";

/// Version of the MCP specification implemented by this server
pub const MCP_VERSION: &str = "2024-11-05";

/// Default server configuration constants
pub mod defaults {
    /// Base URL of the Dune REST API
    pub const DUNE_API_URL: &str = "https://api.dune.com/api/v1";
    /// Header carrying the Dune API credential
    pub const DUNE_API_KEY_HEADER: &str = "X-DUNE-API-KEY";
    /// Configuration file consulted when no path is given on the command line
    pub const CONFIG_PATH: &str = "config/default.toml";
}
