//! # pingpong-types
//!
//! Domain types for the ping-pong MCP server.
//! Pure data types shared by the tool layer and the MCP adapter:
//! operation definitions, input schemas and the structured tool error.

pub mod error;
pub mod operation;
pub mod schema;
pub mod timestamp;

// Re-exports for convenience.
pub use error::{ErrorCode, ToolError};
pub use operation::OperationDefinition;
pub use schema::{FieldSpec, FieldType, SchemaDescriptor, SchemaError};
