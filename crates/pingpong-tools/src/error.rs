//! Registry construction errors.

use thiserror::Error;

/// Errors raised while building the operation registry.
///
/// These only occur at startup and abort the server.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two operations share the same name.
    #[error("duplicate operation name: {name}")]
    DuplicateOperation { name: String },
    /// An operation declared an empty name.
    #[error("operation name cannot be empty")]
    EmptyName,
}
