//! Help rendering
//!
//! This module produces the per-command help page (usage table,
//! documentation, current options after an error) and the top-level
//! command listing grouped by category.

pub mod listing;
pub mod render;

// Re-export main types
pub use listing::*;
pub use render::*;
