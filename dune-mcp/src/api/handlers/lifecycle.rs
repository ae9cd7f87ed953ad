// Lifecycle handlers: session handshake and liveness.

use serde_json::{json, Value};

use crate::api::handlers::HandlerResult;

pub fn initialize(params: Option<Value>) -> HandlerResult {
    if let Some(client) = params.as_ref().and_then(|p| p.get("clientInfo")) {
        log::info!("Client connected: {}", client);
    }
    Ok(crate::api::server_info())
}

pub fn ping() -> HandlerResult {
    Ok(json!({}))
}
