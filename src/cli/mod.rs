//! CLI interface
//!
//! This module handles dispatching process arguments to registered
//! commands, exit codes, and shell completion.

pub mod app;
pub mod completion;

// Re-export main types
pub use app::*;
pub use completion::*;
