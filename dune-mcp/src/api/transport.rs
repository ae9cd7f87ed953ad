// Stdio transport for the MCP server
//
// Newline-delimited JSON-RPC. Each request runs on its own task and its
// response is written as soon as it completes.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::task::JoinSet;

use crate::api::Dispatcher;
use crate::errors::ServerError;
use crate::protocol::{error_codes, JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse};

/// Read requests from `reader` and write responses to `writer` until the
/// input closes and every in-flight request has been answered.
///
/// Malformed lines, including ones that are not UTF-8, are answered with a
/// protocol error. Only I/O failures end the loop early.
pub async fn serve<R, W>(
    dispatcher: Arc<Dispatcher>,
    reader: R,
    mut writer: W,
) -> Result<(), ServerError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);
    // Survives cancelled reads: read_until appends partial data here.
    let mut buf: Vec<u8> = Vec::new();
    let mut in_flight: JoinSet<Option<JsonRpcResponse>> = JoinSet::new();
    let mut input_closed = false;

    loop {
        tokio::select! {
            read = reader.read_until(b'\n', &mut buf), if !input_closed => {
                if read? == 0 {
                    log::info!("Transport input closed, draining {} request(s)", in_flight.len());
                    input_closed = true;
                    continue;
                }

                let response = accept(&dispatcher, &mut in_flight, &buf);
                buf.clear();
                if let Some(response) = response {
                    write_response(&mut writer, &response).await?;
                }
            }
            Some(joined) = in_flight.join_next() => {
                match joined {
                    Ok(Some(response)) => write_response(&mut writer, &response).await?,
                    Ok(None) => {}
                    Err(e) => log::error!("Request task failed: {}", e),
                }
            }
            else => break,
        }
    }

    Ok(())
}

fn parse_error(message: String) -> JsonRpcResponse {
    log::warn!("Discarding unparsable message: {}", message);
    JsonRpcResponse::error(
        JsonRpcId::Null,
        JsonRpcError::new(error_codes::PARSE_ERROR, format!("Parse error: {}", message)),
    )
}

/// Parse one raw line and schedule it. Returns a response to write
/// immediately when the line could not be turned into a request.
fn accept(
    dispatcher: &Arc<Dispatcher>,
    in_flight: &mut JoinSet<Option<JsonRpcResponse>>,
    raw: &[u8],
) -> Option<JsonRpcResponse> {
    let line = match std::str::from_utf8(raw) {
        Ok(line) => line.trim(),
        Err(e) => return Some(parse_error(e.to_string())),
    };
    if line.is_empty() {
        return None;
    }

    let value: serde_json::Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => return Some(parse_error(e.to_string())),
    };

    let request: JsonRpcRequest = match serde_json::from_value(value.clone()) {
        Ok(request) => request,
        Err(e) => {
            let id = value
                .get("id")
                .and_then(|id| serde_json::from_value(id.clone()).ok())
                .unwrap_or(JsonRpcId::Null);
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::new(error_codes::INVALID_REQUEST, format!("Invalid request: {}", e)),
            ));
        }
    };

    let dispatcher = dispatcher.clone();
    in_flight.spawn(async move { dispatcher.handle_request(request).await });
    None
}

async fn write_response<W>(writer: &mut W, response: &JsonRpcResponse) -> Result<(), ServerError>
where
    W: AsyncWrite + Unpin,
{
    let mut bytes = serde_json::to_vec(response)?;
    bytes.push(b'\n');
    writer.write_all(&bytes).await?;
    writer.flush().await?;
    Ok(())
}
