//! The `ping_pong` tool: answers "pong" to "ping".

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use pingpong_types::{
    timestamp, ErrorCode, FieldSpec, FieldType, OperationDefinition, SchemaDescriptor,
    SchemaError, ToolError,
};

use crate::operation::Operation;

/// Registry name of the tool.
pub const PING_PONG_TOOL: &str = "ping_pong";

const MESSAGE_FIELD: &str = "message";

/// Validated arguments. `message` is already trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingPongRequest {
    pub message: String,
}

/// Success payload of a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingPongResponse {
    /// `"pong"` or the explanatory echo.
    pub response: String,
    /// ISO-8601 generation time.
    pub timestamp: String,
}

/// Replies "pong" when sent "ping" (case-insensitive), otherwise explains
/// what it expects.
#[derive(Debug, Clone)]
pub struct PingPongTool {
    definition: OperationDefinition,
}

impl PingPongTool {
    /// Creates the tool with its fixed definition.
    pub fn new() -> Self {
        let schema = SchemaDescriptor::new(vec![FieldSpec::required(
            MESSAGE_FIELD,
            FieldType::String,
            r#"The message to send (should be "ping" to get "pong" response)"#,
        )]);
        Self {
            definition: OperationDefinition::new(
                PING_PONG_TOOL,
                r#"Responds with "pong" when you send "ping""#,
                schema,
            ),
        }
    }

    /// Turns raw arguments into a typed request.
    ///
    /// # Errors
    ///
    /// `INVALID_ARGS` if `arguments` is not an object, `INVALID_MESSAGE`
    /// if `message` is missing or not a string, `EMPTY_MESSAGE` if it is
    /// blank.
    pub fn validate(&self, arguments: &Value) -> Result<PingPongRequest, ToolError> {
        let args = self
            .definition
            .input_schema()
            .validate(arguments)
            .map_err(|e| match e {
                SchemaError::NotAnObject => ToolError::invalid_args("Arguments must be an object"),
                SchemaError::MissingField { .. } | SchemaError::WrongType { .. } => {
                    ToolError::new(ErrorCode::InvalidMessage, "Message must be a string")
                }
            })?;

        let message = args
            .get(MESSAGE_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::new(ErrorCode::InvalidMessage, "Message must be a string"))
            .map(trim_message)?;

        if message.is_empty() {
            return Err(ToolError::new(
                ErrorCode::EmptyMessage,
                "Message cannot be empty",
            ));
        }

        Ok(PingPongRequest {
            message: message.to_string(),
        })
    }

    /// Computes the response text for an already trimmed message.
    pub fn respond(message: &str) -> String {
        if trim_message(message).to_lowercase() == "ping" {
            return "pong".to_string();
        }
        format!(r#"I received "{message}", but I only respond with "pong" when you send "ping""#)
    }

    fn run(&self, arguments: &Value) -> Result<Value, ToolError> {
        let request = self.validate(arguments)?;
        info!(message = %request.message, "Executing ping_pong tool");

        let response = PingPongResponse {
            response: Self::respond(&request.message),
            timestamp: timestamp::now(),
        };
        let payload = serde_json::to_value(&response).map_err(|e| {
            ToolError::execution(format!("Failed to execute {PING_PONG_TOOL} tool"))
                .with_details(e.to_string())
        })?;

        info!(
            response = %response.response,
            timestamp = %response.timestamp,
            "Ping_pong tool execution completed"
        );
        Ok(payload)
    }
}

/// Trims whitespace, counting a byte order mark as whitespace.
fn trim_message(message: &str) -> &str {
    message.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

impl Default for PingPongTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Operation for PingPongTool {
    fn definition(&self) -> &OperationDefinition {
        &self.definition
    }

    fn execute(&self, arguments: &Value) -> Result<Value, ToolError> {
        self.run(arguments).map_err(|e| {
            error!(code = %e.code, error = %e.message, "Error executing ping_pong tool");
            e
        })
    }
}
