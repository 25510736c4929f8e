/*!
 * Memory Module
 * Contiguous block bookkeeping over a simulated address space
 */

pub mod block_list;
pub mod fit;
pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use block_list::{BlockList, InvariantViolation};
pub use fit::Strategy;
pub use manager::MemoryManager;
pub use traits::*;
pub use types::*;
