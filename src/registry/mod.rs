//! Command registration and dispatch
//!
//! Commands are registered with an explicit signature and a handler. The
//! registry derives each command's options once, at registration, and
//! binds tokens against them when a command is dispatched.

pub mod command;
pub mod registry;

// Re-export main types
pub use command::*;
pub use registry::*;
