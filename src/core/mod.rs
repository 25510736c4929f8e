/*!
 * Core Module
 * Fundamental simulator types and limits
 */

pub mod data_structures;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use data_structures::OwnerId;
pub use types::*;
