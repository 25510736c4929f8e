/*!
 * blocksim
 * Contiguous memory allocation simulator exposed as a library
 */

pub mod config;
pub mod core;
pub mod memory;
pub mod monitoring;
pub mod shell;

// Re-exports
pub use config::{ConfigError, SimConfig, StatusFormat};
pub use crate::core::{Address, OwnerId, Size};
pub use memory::{
    AllocatedBlock, Allocator, BlockDescriptor, BlockList, CompactionReport, Compactor,
    MemoryError, MemoryInfo, MemoryManager, MemoryResult, MemoryStats, ReleasedBlock, Strategy,
};
pub use monitoring::init_tracing;
pub use shell::{Command, Shell};
