//! The callable unit exposed through `tools/call`.

use serde_json::Value;

use pingpong_types::{OperationDefinition, ToolError};

/// A named, schema-described unit of work.
///
/// Implementations hold no mutable state, so a single instance can
/// serve any number of calls, concurrently or not.
pub trait Operation: Send + Sync {
    /// The immutable definition advertised by `tools/list`.
    fn definition(&self) -> &OperationDefinition;

    /// Validates `arguments` and runs the operation.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolError`] for invalid arguments or execution faults.
    fn execute(&self, arguments: &Value) -> Result<Value, ToolError>;

    /// Shorthand for `definition().name()`.
    fn name(&self) -> &str {
        self.definition().name()
    }
}
