//! Structured tool errors.
//!
//! Every validation or execution failure surfaces as a [`ToolError`]:
//! a machine-readable [`ErrorCode`], a human-readable message and
//! optional details.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Machine-readable category of a tool failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Arguments were not a JSON object.
    InvalidArgs,
    /// The `message` field was missing or not a string.
    InvalidMessage,
    /// The message was blank after trimming.
    EmptyMessage,
    /// Unexpected fault while executing an operation.
    ExecutionError,
    /// The requested operation is not registered.
    UnknownTool,
}

impl ErrorCode {
    /// Returns the wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgs => "INVALID_ARGS",
            Self::InvalidMessage => "INVALID_MESSAGE",
            Self::EmptyMessage => "EMPTY_MESSAGE",
            Self::ExecutionError => "EXECUTION_ERROR",
            Self::UnknownTool => "UNKNOWN_TOOL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured failure raised by validation or execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// The error category.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured details (e.g. the underlying error).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ToolError {
    /// Creates a new `ToolError` without details.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attaches structured details to the error.
    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Creates an `INVALID_ARGS` error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgs, message)
    }

    /// Creates an `EXECUTION_ERROR` error.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExecutionError, message)
    }

    /// Creates the `UNKNOWN_TOOL` error for the given operation name.
    pub fn unknown_tool(name: &str) -> Self {
        Self::new(ErrorCode::UnknownTool, format!("Unknown tool: {name}"))
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}
