//! Operation identity and advertisement.

use serde::{Deserialize, Serialize};

use crate::schema::SchemaDescriptor;

/// Immutable description of a callable operation.
///
/// This is what `tools/list` advertises: a unique name, a description
/// and the input schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDefinition {
    name: String,
    description: String,
    #[serde(rename = "inputSchema")]
    input_schema: SchemaDescriptor,
}

impl OperationDefinition {
    /// Creates a new definition.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: SchemaDescriptor,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    /// Operation name (registry key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared input schema.
    pub fn input_schema(&self) -> &SchemaDescriptor {
        &self.input_schema
    }
}
