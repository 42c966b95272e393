//! Dispatcher behaviour over the default registry, including the log
//! entries emitted around each call.

use std::io;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use pingpong_tools::{Dispatcher, InvocationRequest, InvocationResult, OperationRegistry};
use pingpong_types::ErrorCode;

fn dispatcher() -> Dispatcher {
    Dispatcher::new(Arc::new(
        OperationRegistry::with_defaults().expect("registry"),
    ))
}

fn invoke(name: &str, arguments: Value) -> InvocationResult {
    dispatcher().handle_invoke(&InvocationRequest::new(name, arguments))
}

/// Shared in-memory log sink.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().expect("lock").clone()).expect("utf8")
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let sink = Captured::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, sink.text())
}

#[test]
fn ping_returns_pong_with_timestamp() {
    let payload = invoke("ping_pong", json!({"message": "Ping"}))
        .into_result()
        .expect("success");
    assert_eq!(payload["response"], "pong");
    assert!(payload["timestamp"].as_str().expect("ts").ends_with('Z'));
}

#[test]
fn hello_is_explained() {
    let payload = invoke("ping_pong", json!({"message": "hello"}))
        .into_result()
        .expect("success");
    assert_eq!(
        payload["response"],
        r#"I received "hello", but I only respond with "pong" when you send "ping""#
    );
}

#[test]
fn validation_failures_keep_their_codes() {
    let cases = [
        (json!(null), ErrorCode::InvalidArgs),
        (json!(17), ErrorCode::InvalidArgs),
        (json!({"message": 123}), ErrorCode::InvalidMessage),
        (json!({"message": "   "}), ErrorCode::EmptyMessage),
        (json!({"message": ""}), ErrorCode::EmptyMessage),
    ];
    for (arguments, code) in cases {
        let err = invoke("ping_pong", arguments.clone())
            .into_result()
            .expect_err("failure");
        assert_eq!(err.code, code, "arguments: {arguments}");
    }
}

#[test]
fn unknown_tool_is_a_failure_result_naming_the_tool() {
    let result = invoke("teleport", json!({}));
    match result {
        InvocationResult::Failure(err) => {
            assert_eq!(err.code, ErrorCode::UnknownTool);
            assert!(err.message.contains("teleport"));
        }
        InvocationResult::Success { .. } => panic!("unknown tool must fail"),
    }
}

#[test]
fn list_returns_single_ping_pong_definition() {
    let d = dispatcher();
    let defs = d.handle_list();
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].name(), "ping_pong");
    let schema = defs[0].input_schema().to_json_schema();
    assert_eq!(schema["properties"]["message"]["type"], "string");
    assert_eq!(schema["required"], json!(["message"]));
}

#[test]
fn successful_call_logs_request_and_outcome() {
    let (result, logs) = with_captured_logs(|| invoke("ping_pong", json!({"message": "ping"})));
    assert!(result.is_success());
    assert!(logs.contains("Handling tool call request"));
    assert!(logs.contains("Executing ping_pong tool"));
    assert!(logs.contains("Ping_pong tool execution completed"));
    assert!(logs.contains("Tool call succeeded"));
}

#[test]
fn failed_call_logs_error_with_tool_name() {
    let (result, logs) = with_captured_logs(|| invoke("ping_pong", json!({"message": 5})));
    assert!(!result.is_success());
    assert!(logs.contains("ERROR"));
    assert!(logs.contains("tool_name=ping_pong"));
    assert!(logs.contains("INVALID_MESSAGE"));
}

#[test]
fn list_logs_one_entry() {
    let (_, logs) = with_captured_logs(|| dispatcher().handle_list().len());
    assert_eq!(logs.matches("Handling list tools request").count(), 1);
}
