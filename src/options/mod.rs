//! Option derivation
//!
//! This module turns a signature into an ordered option set: long
//! spellings, short aliases, value types and switch/list behavior.

pub mod derive;
pub mod types;

// Re-export main types
pub use derive::*;
pub use types::*;
