//! # pingpong-tools
//!
//! The operation registry and invocation contract.
//!
//! An [`Operation`] advertises a definition and executes against raw
//! JSON arguments. The [`OperationRegistry`] holds the fixed set built at
//! startup, and the [`Dispatcher`] turns every call into a uniform
//! [`InvocationResult`], whatever the operation does.

pub mod dispatcher;
pub mod error;
pub mod operation;
pub mod ping_pong;
pub mod registry;

pub use dispatcher::{Dispatcher, InvocationRequest, InvocationResult};
pub use error::RegistryError;
pub use operation::Operation;
pub use ping_pong::{PingPongRequest, PingPongResponse, PingPongTool, PING_PONG_TOOL};
pub use registry::{OperationRegistry, RegistryBuilder};
