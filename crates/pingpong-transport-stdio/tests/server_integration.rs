//! Integration tests for the MCP stdio server loop.

use std::sync::Arc;

use serde_json::Value;

use pingpong_tools::{Dispatcher, OperationRegistry};
use pingpong_transport_stdio::{McpHandler, McpServer, StdioTransport};

fn make_handler() -> McpHandler {
    let registry = OperationRegistry::with_defaults().expect("registry");
    McpHandler::new(Dispatcher::new(Arc::new(registry)), "ping-pong-server")
}

/// Feeds `input` through a server and returns every output line as JSON.
async fn run_session(input: &str) -> Vec<Value> {
    run_raw_session(input.as_bytes()).await
}

async fn run_raw_session(input: &[u8]) -> Vec<Value> {
    let reader = tokio::io::BufReader::new(input);
    let mut output = Vec::new();
    let transport = StdioTransport::new(reader, &mut output);
    let mut server = McpServer::new(transport, make_handler());
    server.run().await.expect("run");
    drop(server);

    String::from_utf8(output)
        .expect("utf8")
        .lines()
        .map(|l| serde_json::from_str(l).expect("each line is json"))
        .collect()
}

#[tokio::test]
async fn full_session_initialize_list_call() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"t","version":"1"}}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"ping_pong","arguments":{"message":" PING "}}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":"four","method":"tools/call","params":{"name":"ping_pong","arguments":{"message":"hello"}}}"#,
        "\n",
    );
    let responses = run_session(input).await;
    assert_eq!(responses.len(), 4, "notification must not be answered");

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "ping-pong-server");

    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"]["tools"][0]["name"], "ping_pong");

    assert_eq!(responses[2]["id"], 3);
    let text = responses[2]["result"]["content"][0]["text"].as_str().expect("text");
    let body: Value = serde_json::from_str(text).expect("body");
    assert_eq!(body["response"], "pong");

    assert_eq!(responses[3]["id"], "four");
    let text = responses[3]["result"]["content"][0]["text"].as_str().expect("text");
    assert!(text.contains(r#"I received \"hello\""#));
}

#[tokio::test]
async fn tool_errors_do_not_end_the_session() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"nope","arguments":{}}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"ping_pong","arguments":{"message":"   "}}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"ping_pong","arguments":{"message":"ping"}}}"#,
        "\n",
    );
    let responses = run_session(input).await;
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["result"]["isError"], true);
    assert_eq!(responses[1]["result"]["isError"], true);
    assert_eq!(responses[2]["result"]["isError"], false);
}

#[tokio::test]
async fn server_handles_notification_silently() {
    let responses =
        run_session("{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n").await;
    assert!(responses.is_empty(), "notifications must not produce output");
}

#[tokio::test]
async fn server_returns_parse_error_on_garbage() {
    let responses = run_session("not json at all\n").await;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0]["id"].is_null());
    assert!(responses[0]["error"]["message"]
        .as_str()
        .expect("msg")
        .contains("parse error"));
}

#[tokio::test]
async fn invalid_utf8_line_is_answered_and_session_continues() {
    let input: &[u8] = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\",\"x\":\"\xff\"}\n\
                         {\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n";
    let responses = run_raw_session(input).await;
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0]["id"].is_null());
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"], serde_json::json!({}));
}

#[tokio::test]
async fn server_returns_invalid_request_for_non_rpc_json() {
    let responses = run_session("{\"jsonrpc\":\"2.0\",\"id\":5}\n").await;
    assert_eq!(responses[0]["error"]["code"], -32600);
}

#[tokio::test]
async fn server_handles_empty_lines() {
    let responses =
        run_session("\n\n{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n").await;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], 2);
}

#[tokio::test]
async fn server_eof_shuts_down_cleanly() {
    assert!(run_session("").await.is_empty());
}

#[tokio::test]
async fn server_unknown_method_returns_error() {
    let responses = run_session("{\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"foo/bar\"}\n").await;
    assert!(responses[0]["error"]["message"]
        .as_str()
        .expect("msg")
        .contains("unknown method"));
}
