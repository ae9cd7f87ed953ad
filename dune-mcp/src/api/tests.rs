#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use crate::api::{transport, Dispatcher};
    use crate::client::QueryResultsSource;
    use crate::errors::{DuneError, ResourceError, ToolError};
    use crate::protocol::{error_codes, Content, JsonRpcId, JsonRpcRequest, JsonRpcResponse};
    use crate::tools::init_registry;

    /// Query source that records every id and can be switched to failing
    #[derive(Default)]
    struct StubSource {
        calls: Mutex<Vec<String>>,
        fail: AtomicBool,
    }

    #[async_trait]
    impl QueryResultsSource for StubSource {
        async fn query_results(&self, query_id: &str) -> Result<Value, DuneError> {
            self.calls.lock().unwrap().push(query_id.to_string());
            if self.fail.load(Ordering::SeqCst) {
                return Err(DuneError::InvalidUrl("connection refused".to_string()));
            }
            Ok(json!({"rows": [1, 2, 3]}))
        }
    }

    fn dispatcher() -> (Dispatcher, Arc<StubSource>) {
        let source = Arc::new(StubSource::default());
        (Dispatcher::new(init_registry(source.clone()).unwrap()), source)
    }

    fn text_json(content: &[Content]) -> Value {
        assert_eq!(content.len(), 1);
        let Content::Text { text } = &content[0];
        serde_json::from_str(text).unwrap()
    }

    fn request(id: i64, method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(JsonRpcId::Number(id.into())),
            method: method.to_string(),
            params: Some(params),
        }
    }

    #[test]
    fn test_list_tools() {
        let (dispatcher, _) = dispatcher();
        let tools = dispatcher.list_tools();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["get_query_data", "get_dashboard_queries"]);

        assert_eq!(
            tools[0].input_schema,
            json!({
                "type": "object",
                "properties": {
                    "query_id": {"type": "string", "description": "Query Id identifier"}
                },
                "required": ["query_id"]
            })
        );
        assert_eq!(
            tools[1].input_schema,
            json!({"type": "object", "properties": {}, "required": []})
        );
    }

    #[test]
    fn test_list_resources() {
        let (dispatcher, _) = dispatcher();
        let resources = dispatcher.list_resources();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].mime_type, "application/json");
    }

    #[test]
    fn test_catalog_listing_is_idempotent() {
        let (dispatcher, _) = dispatcher();
        assert_eq!(dispatcher.list_resources(), dispatcher.list_resources());
        assert_eq!(dispatcher.list_tools(), dispatcher.list_tools());
    }

    #[tokio::test]
    async fn test_get_dashboard_queries() {
        let (dispatcher, source) = dispatcher();
        let result = dispatcher
            .call_tool("get_dashboard_queries", json!({}))
            .await
            .unwrap();

        assert_eq!(
            text_json(&result.content),
            json!([
                {"query_id": "3705945", "description": "Total deployed"},
                {"query_id": "3706280", "description": "Fee & Revenue"},
                {"query_id": "3919233", "description": "Monthly transactions and monthly volume"}
            ])
        );
        assert!(source.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_query_data_requires_query_id() {
        let (dispatcher, source) = dispatcher();
        let err = dispatcher
            .call_tool("get_query_data", json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::InvalidParameters(_)));
        assert_eq!(err.code(), error_codes::INVALID_PARAMS);
        assert!(source.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_query_data_returns_remote_document() {
        let (dispatcher, source) = dispatcher();
        let result = dispatcher
            .call_tool("get_query_data", json!({"query_id": "42"}))
            .await
            .unwrap();

        assert_eq!(text_json(&result.content), json!({"rows": [1, 2, 3]}));
        assert_eq!(*source.calls.lock().unwrap(), vec!["42".to_string()]);
    }

    #[tokio::test]
    async fn test_remote_failure_is_surfaced_and_server_keeps_serving() {
        let (dispatcher, source) = dispatcher();
        source.fail.store(true, Ordering::SeqCst);

        let err = dispatcher
            .call_tool("get_query_data", json!({"query_id": "42"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::External(_)));
        assert_eq!(err.code(), error_codes::INTERNAL_ERROR);

        let next = dispatcher
            .call_tool("get_dashboard_queries", json!({}))
            .await;
        assert!(next.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let (dispatcher, _) = dispatcher();
        let err = dispatcher.call_tool("unknown_tool", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(ref name) if name == "unknown_tool"));
        assert_eq!(err.code(), error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_panicking_tool_becomes_internal_error() {
        use crate::tools::{Tool, ToolDefinition, ToolRegistry, ToolResult};

        struct Explodes;

        #[async_trait]
        impl Tool for Explodes {
            fn definition(&self) -> ToolDefinition {
                ToolDefinition {
                    name: "explodes".to_string(),
                    description: "Always panics".to_string(),
                    parameters: vec![],
                }
            }

            async fn execute(&self, _arguments: Value) -> ToolResult {
                panic!("boom")
            }
        }

        let mut registry = ToolRegistry::new();
        registry.register_tool(Arc::new(Explodes)).unwrap();
        let dispatcher = Dispatcher::new(Arc::new(registry));

        let err = dispatcher.call_tool("explodes", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));

        let rpc = err.into_rpc_error("explodes");
        assert_eq!(rpc.code, error_codes::INTERNAL_ERROR);
        assert!(rpc.message.contains("explodes"));
    }

    #[tokio::test]
    async fn test_read_resource() {
        let (dispatcher, _) = dispatcher();
        let result = dispatcher
            .read_resource(crate::catalog::DASHBOARD_URI)
            .unwrap();
        assert_eq!(result.contents.len(), 1);
        assert_eq!(result.contents[0].mime_type, "application/json");

        let parsed: Value = serde_json::from_str(&result.contents[0].text).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(3));

        let err = dispatcher.read_resource("dune://missing").unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(ref uri) if uri == "dune://missing"));
        assert_eq!(err.code(), error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_handle_request_read_resource() {
        let (dispatcher, _) = dispatcher();

        let found = dispatcher
            .handle_request(request(
                1,
                "resources/read",
                json!({"uri": "dune://hashed_official/pumpdotfun"}),
            ))
            .await
            .unwrap();
        let contents = &found.result.unwrap()["contents"];
        assert_eq!(contents[0]["mimeType"], "application/json");

        let missing = dispatcher
            .handle_request(request(2, "resources/read", json!({"uri": "dune://missing"})))
            .await
            .unwrap();
        let error = missing.error.unwrap();
        assert_eq!(error.code, error_codes::INVALID_PARAMS);
        assert_eq!(error.message, "Unknown resource: dune://missing");
    }

    #[tokio::test]
    async fn test_handle_request_routes_methods() {
        let (dispatcher, _) = dispatcher();

        let init = dispatcher
            .handle_request(request(1, "initialize", json!({})))
            .await
            .unwrap();
        let result = init.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "dune-data-server");
        assert_eq!(result["capabilities"], json!({"resources": {}, "tools": {}}));

        let list = dispatcher
            .handle_request(request(2, "tools/list", json!({})))
            .await
            .unwrap();
        assert_eq!(list.result.unwrap()["tools"].as_array().map(Vec::len), Some(2));

        let resources = dispatcher
            .handle_request(request(3, "resources/list", json!({})))
            .await
            .unwrap();
        assert_eq!(
            resources.result.unwrap()["resources"][0]["uri"],
            "dune://hashed_official/pumpdotfun"
        );

        let unknown = dispatcher
            .handle_request(request(4, "prompts/list", json!({})))
            .await
            .unwrap();
        assert_eq!(unknown.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_handle_request_tool_errors() {
        let (dispatcher, source) = dispatcher();

        let missing = dispatcher
            .handle_request(request(1, "tools/call", json!({"name": "get_query_data"})))
            .await
            .unwrap();
        let error = missing.error.unwrap();
        assert_eq!(error.code, error_codes::INVALID_PARAMS);
        assert_eq!(error.message, "Missing query_id parameter");

        let unknown = dispatcher
            .handle_request(request(2, "tools/call", json!({"name": "unknown_tool"})))
            .await
            .unwrap();
        let error = unknown.error.unwrap();
        assert_eq!(error.code, error_codes::METHOD_NOT_FOUND);
        assert_eq!(error.message, "Unknown tool: unknown_tool");

        let no_name = dispatcher
            .handle_request(request(3, "tools/call", json!({"arguments": {}})))
            .await
            .unwrap();
        assert_eq!(no_name.error.unwrap().code, error_codes::INVALID_PARAMS);

        source.fail.store(true, Ordering::SeqCst);
        let failed = dispatcher
            .handle_request(request(
                4,
                "tools/call",
                json!({"name": "get_query_data", "arguments": {"query_id": "42"}}),
            ))
            .await
            .unwrap();
        let error = failed.error.unwrap();
        assert_eq!(failed.id, JsonRpcId::Number(4.into()));
        assert_eq!(error.code, error_codes::INTERNAL_ERROR);
        assert!(!error.message.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let (dispatcher, _) = dispatcher();
        let notification = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "notifications/initialized".to_string(),
            params: None,
        };
        assert!(dispatcher.handle_request(notification).await.is_none());
    }

    async fn run_transport(input: &[&[u8]]) -> Vec<JsonRpcResponse> {
        let (dispatcher, _) = dispatcher();
        let mut builder = tokio_test::io::Builder::new();
        for chunk in input {
            builder.read(chunk);
        }
        let reader = builder.build();
        let mut output: Vec<u8> = Vec::new();

        transport::serve(Arc::new(dispatcher), reader, &mut output)
            .await
            .unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_transport_round_trip() {
        let responses = run_transport(&[
            b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n",
            b"{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n\n",
            b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/call\",",
            b"\"params\":{\"name\":\"get_query_data\",\"arguments\":{\"query_id\":\"42\"}}}\n",
        ])
        .await;

        assert_eq!(responses.len(), 2);
        let ping = responses
            .iter()
            .find(|r| r.id == JsonRpcId::Number(1.into()))
            .unwrap();
        assert_eq!(ping.result, Some(json!({})));

        let call = responses
            .iter()
            .find(|r| r.id == JsonRpcId::Number(2.into()))
            .unwrap();
        let text = call.result.as_ref().unwrap()["content"][0]["text"]
            .as_str()
            .unwrap()
            .to_string();
        assert_eq!(
            serde_json::from_str::<Value>(&text).unwrap(),
            json!({"rows": [1, 2, 3]})
        );
    }

    #[tokio::test]
    async fn test_transport_survives_invalid_utf8() {
        let responses = run_transport(&[
            b"\xff\xfe garbage\n",
            b"{\"jsonrpc\":\"2.0\",\"id\":6,\"method\":\"ping\"}\n",
        ])
        .await;

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].id, JsonRpcId::Null);
        assert_eq!(
            responses[0].error.as_ref().unwrap().code,
            error_codes::PARSE_ERROR
        );
        assert_eq!(responses[1].id, JsonRpcId::Number(6.into()));
        assert_eq!(responses[1].result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_transport_answers_last_line_without_newline() {
        let responses =
            run_transport(&[b"{\"jsonrpc\":\"2.0\",\"id\":9,\"method\":\"ping\"}"]).await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].id, JsonRpcId::Number(9.into()));
    }

    #[tokio::test]
    async fn test_transport_reports_parse_errors_and_continues() {
        let responses = run_transport(&[
            b"this is not json\n",
            b"{\"id\":5}\n",
            b"{\"jsonrpc\":\"2.0\",\"id\":6,\"method\":\"ping\"}\n",
        ])
        .await;

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0].id, JsonRpcId::Null);
        assert_eq!(
            responses[0].error.as_ref().unwrap().code,
            error_codes::PARSE_ERROR
        );
        assert_eq!(responses[1].id, JsonRpcId::Number(5.into()));
        assert_eq!(
            responses[1].error.as_ref().unwrap().code,
            error_codes::INVALID_REQUEST
        );
        assert_eq!(responses[2].id, JsonRpcId::Number(6.into()));
        assert!(responses[2].error.is_none());
    }
}
