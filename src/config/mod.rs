//! Settings and manifest handling
//!
//! This module holds the process-wide settings that govern option
//! derivation, and parses and validates `argspec.yml` manifests that
//! declare command signatures statically.

pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use parse::*;
pub use schema::*;
pub use types::*;
