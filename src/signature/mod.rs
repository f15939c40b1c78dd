//! Signature model
//!
//! A signature is the explicit description of a handler's parameters: names,
//! positions and declared defaults. Everything downstream (option
//! derivation, binding, help) reads the signature and never the handler.

pub mod types;
pub mod value;

// Re-export main types
pub use types::*;
pub use value::*;
