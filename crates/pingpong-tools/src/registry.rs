//! The fixed set of operations the server can dispatch to.
//!
//! Operations are registered once through [`RegistryBuilder`]; the built
//! [`OperationRegistry`] has no mutating API.

use std::collections::HashMap;

use tracing::debug;

use pingpong_types::OperationDefinition;

use crate::error::RegistryError;
use crate::operation::Operation;
use crate::ping_pong::PingPongTool;

/// Read-only registry of operations keyed by name.
pub struct OperationRegistry {
    operations: Vec<Box<dyn Operation>>,
    by_name: HashMap<String, usize>,
}

impl OperationRegistry {
    /// Starts building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The registry served by the ping-pong server.
    ///
    /// # Errors
    ///
    /// Propagates [`RegistryError`] from registration.
    pub fn with_defaults() -> Result<Self, RegistryError> {
        Ok(Self::builder().register(PingPongTool::new())?.build())
    }

    /// All definitions, in registration order.
    pub fn list(&self) -> Vec<&OperationDefinition> {
        self.operations.iter().map(|op| op.definition()).collect()
    }

    /// Finds an operation by name.
    pub fn find(&self, name: &str) -> Option<&dyn Operation> {
        self.by_name
            .get(name)
            .map(|&idx| self.operations[idx].as_ref())
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true if no operation is registered.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Collects operations before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    operations: Vec<Box<dyn Operation>>,
    by_name: HashMap<String, usize>,
}

impl RegistryBuilder {
    /// Adds an operation.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] or
    /// [`RegistryError::DuplicateOperation`]; callers abort startup.
    pub fn register(mut self, operation: impl Operation + 'static) -> Result<Self, RegistryError> {
        let name = operation.name().to_string();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateOperation { name });
        }

        debug!(operation = %name, "registered operation");
        self.by_name.insert(name, self.operations.len());
        self.operations.push(Box::new(operation));
        Ok(self)
    }

    /// Freezes the registry.
    pub fn build(self) -> OperationRegistry {
        OperationRegistry {
            operations: self.operations,
            by_name: self.by_name,
        }
    }
}
