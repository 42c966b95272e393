//! Routes invocation requests to operations and normalizes outcomes.
//!
//! Every call yields exactly one [`InvocationResult`]. Unknown names,
//! tool errors and panics inside an operation all come back as
//! `Failure`, so a bad call never ends the host's session.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use pingpong_types::{OperationDefinition, ToolError};

use crate::registry::OperationRegistry;

/// A decoded `tools/call`.
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    /// Name of the operation to invoke.
    pub operation_name: String,
    /// Raw, unvalidated arguments.
    pub arguments: Value,
}

impl InvocationRequest {
    /// Creates a new request.
    pub fn new(operation_name: impl Into<String>, arguments: Value) -> Self {
        Self {
            operation_name: operation_name.into(),
            arguments,
        }
    }
}

/// Uniform envelope for the outcome of a call.
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationResult {
    /// The operation returned a payload.
    Success { payload: Value },
    /// Validation, lookup or execution failed.
    Failure(ToolError),
}

impl InvocationResult {
    /// Returns true for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Converts into a standard `Result`.
    pub fn into_result(self) -> Result<Value, ToolError> {
        match self {
            Self::Success { payload } => Ok(payload),
            Self::Failure(err) => Err(err),
        }
    }
}

impl From<Result<Value, ToolError>> for InvocationResult {
    fn from(result: Result<Value, ToolError>) -> Self {
        match result {
            Ok(payload) => Self::Success { payload },
            Err(err) => Self::Failure(err),
        }
    }
}

/// Stateless dispatcher over a shared registry.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<OperationRegistry>,
}

impl Dispatcher {
    /// Creates a dispatcher over `registry`.
    pub fn new(registry: Arc<OperationRegistry>) -> Self {
        Self { registry }
    }

    /// Definitions of every registered operation, in registration order.
    pub fn handle_list(&self) -> Vec<&OperationDefinition> {
        info!("Handling list tools request");
        self.registry.list()
    }

    /// Looks up, validates and executes a call.
    pub fn handle_invoke(&self, request: &InvocationRequest) -> InvocationResult {
        let name = request.operation_name.as_str();
        info!(
            tool_name = %name,
            arguments = %request.arguments,
            "Handling tool call request"
        );

        let Some(operation) = self.registry.find(name) else {
            let err = ToolError::unknown_tool(name);
            error!(tool_name = %name, code = %err.code, "Error calling tool");
            return InvocationResult::Failure(err);
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            operation.execute(&request.arguments)
        }))
        .unwrap_or_else(|payload| Err(ToolError::execution(panic_message(payload.as_ref()))));

        match &outcome {
            Ok(_) => info!(tool_name = %name, "Tool call succeeded"),
            Err(err) => error!(
                tool_name = %name,
                code = %err.code,
                error = %err.message,
                "Error calling tool"
            ),
        }
        outcome.into()
    }
}

/// Best-effort text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown error occurred".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pingpong_types::{ErrorCode, SchemaDescriptor};
    use serde_json::json;

    use crate::operation::Operation;

    struct Exploding(OperationDefinition);

    impl Operation for Exploding {
        fn definition(&self) -> &OperationDefinition {
            &self.0
        }

        fn execute(&self, _: &Value) -> Result<Value, ToolError> {
            panic!("boom");
        }
    }

    fn dispatcher_with_exploding() -> Dispatcher {
        let registry = OperationRegistry::builder()
            .register(Exploding(OperationDefinition::new(
                "explode",
                "always panics",
                SchemaDescriptor::default(),
            )))
            .expect("register")
            .build();
        Dispatcher::new(Arc::new(registry))
    }

    #[test]
    fn panic_is_normalized_to_execution_error() {
        let result = dispatcher_with_exploding()
            .handle_invoke(&InvocationRequest::new("explode", json!({})));
        let err = result.into_result().expect_err("failure");
        assert_eq!(err.code, ErrorCode::ExecutionError);
        assert_eq!(err.message, "boom");
    }

    #[test]
    fn dispatcher_survives_a_panic() {
        let dispatcher = dispatcher_with_exploding();
        assert!(!dispatcher
            .handle_invoke(&InvocationRequest::new("explode", json!({})))
            .is_success());
        let again = dispatcher.handle_invoke(&InvocationRequest::new("nope", json!({})));
        assert_eq!(
            again.into_result().expect_err("unknown").code,
            ErrorCode::UnknownTool
        );
    }

    #[test]
    fn panic_message_fallback() {
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "Unknown error occurred");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
    }
}
