/*!
 * Memory Management
 *
 * Session object owning the simulated address space and its block list.
 *
 * ## Operations
 *
 * - **Allocation**: first-fit, best-fit or worst-fit placement; the chosen free block
 *   is split when larger than the request
 * - **Release**: the first block of an owner (address order) is freed and merged with
 *   free neighbours
 * - **Compaction**: allocated blocks slide to offset 0 in their original order,
 *   leaving a single trailing free block
 * - **Snapshots and statistics**: read-only copies for status rendering
 *
 * Every operation either completes or fails without touching the block list.
 */

mod allocator;
mod compaction;
mod release;
mod stats;

use super::block_list::BlockList;
use super::fit::Strategy;
use super::traits::{Allocator, Compactor, MemoryInfo};
use super::types::*;
use crate::core::types::Size;
use crate::core::OwnerId;
use tracing::info;

/// Memory manager for one simulation session
#[derive(Debug, Clone)]
pub struct MemoryManager {
    pub(super) blocks: BlockList,
}

impl MemoryManager {
    /// Create a manager whose address space is `[0, total)`, initially one free block
    pub fn with_capacity(total: Size) -> Self {
        info!(total, "Memory manager initialized with {} bytes", total);
        Self {
            blocks: BlockList::new(total),
        }
    }

    #[inline]
    pub fn total_memory(&self) -> Size {
        self.blocks.total_size()
    }

    /// Direct read access to the block list
    #[inline]
    pub fn blocks(&self) -> &BlockList {
        &self.blocks
    }

    #[inline]
    fn debug_check(&self) {
        #[cfg(debug_assertions)]
        if let Err(violation) = self.blocks.check_invariants() {
            panic!("block list invariant violated: {}", violation);
        }
    }
}

// Implement trait interfaces
impl Allocator for MemoryManager {
    fn allocate(
        &mut self,
        owner: OwnerId,
        size: Size,
        strategy: Strategy,
    ) -> MemoryResult<AllocatedBlock> {
        MemoryManager::allocate(self, owner, size, strategy)
    }

    fn release(&mut self, owner: &str) -> MemoryResult<ReleasedBlock> {
        MemoryManager::release(self, owner)
    }
}

impl Compactor for MemoryManager {
    fn compact(&mut self) -> MemoryResult<CompactionReport> {
        MemoryManager::compact(self)
    }
}

impl MemoryInfo for MemoryManager {
    fn snapshot(&self) -> Vec<BlockDescriptor> {
        MemoryManager::snapshot(self)
    }

    fn stats(&self) -> MemoryStats {
        MemoryManager::stats(self)
    }

    fn info(&self) -> (Size, Size, Size) {
        MemoryManager::info(self)
    }

    fn owner_memory(&self, owner: &str) -> Size {
        MemoryManager::owner_memory(self, owner)
    }
}
