//! Value binding
//!
//! This module resolves raw command line tokens against an option set:
//! flag lookup, positional assignment, type coercion and the completeness
//! check that precedes any handler call.

pub mod bind;
pub mod binding;
pub mod token;

// Re-export main types
pub use bind::*;
pub use binding::*;
pub use token::*;
