//! Argspec - command line interfaces derived from command signatures
//!
//! Each command is registered with an explicit signature: parameter names,
//! positions and defaults. Argspec derives long and short options from it,
//! binds command line tokens to values, renders help and dispatches to the
//! command's handler.

// Public modules
pub mod binder;
pub mod cli;
pub mod config;
pub mod error;
pub mod help;
pub mod options;
pub mod registry;
pub mod signature;

// Re-export commonly used types
pub use binder::BoundArgs;
pub use cli::App;
pub use config::{HyphenMode, Settings};
pub use error::{ArgspecError, Result};
pub use registry::{CommandDef, CommandError, CommandResult, Registry};
pub use signature::{Signature, Value};

/// Current version of Argspec
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
