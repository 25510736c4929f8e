/*!
 * Memory Traits
 * Operation contract consumed by collaborators such as the shell
 */

use super::fit::Strategy;
use super::types::*;
use crate::core::types::Size;
use crate::core::OwnerId;

/// Allocation and release
pub trait Allocator {
    /// Allocate `size` bytes for `owner` using `strategy`
    fn allocate(
        &mut self,
        owner: OwnerId,
        size: Size,
        strategy: Strategy,
    ) -> MemoryResult<AllocatedBlock>;

    /// Release the first block (in address order) owned by `owner`
    fn release(&mut self, owner: &str) -> MemoryResult<ReleasedBlock>;
}

/// Full compaction
pub trait Compactor {
    fn compact(&mut self) -> MemoryResult<CompactionReport>;
}

/// Read-only views of the block list
pub trait MemoryInfo {
    /// Ordered copy of every block
    fn snapshot(&self) -> Vec<BlockDescriptor>;

    /// Overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Memory info as (total, used, available)
    fn info(&self) -> (Size, Size, Size);

    /// Bytes currently held by `owner`
    fn owner_memory(&self, owner: &str) -> Size;

    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}
