/*!
 * Memory Allocator Implementation
 * Fit selection and block splitting
 */

use super::super::fit::Strategy;
use super::super::types::{AllocatedBlock, MemoryError, MemoryPressure, MemoryResult};
use super::MemoryManager;
use crate::core::types::Size;
use crate::core::OwnerId;
use tracing::{debug, info, warn};

impl MemoryManager {
    /// Allocate `size` bytes for `owner`, placing the block with `strategy`
    ///
    /// An exact-size candidate is taken in place; a larger one is split and the free
    /// remainder stays directly after the new block. Owner ids may repeat: each call
    /// creates its own block.
    pub fn allocate(
        &mut self,
        owner: OwnerId,
        size: Size,
        strategy: Strategy,
    ) -> MemoryResult<AllocatedBlock> {
        if size == 0 {
            return Err(MemoryError::InvalidRequest { size });
        }

        let Some(index) = strategy.select(&self.blocks, size) else {
            let largest_free = self.blocks.largest_free_block();
            let available = self.blocks.free_bytes();
            warn!(
                owner = %owner,
                %strategy,
                "Not enough memory to allocate {} bytes (largest free block {}, {} free)",
                size, largest_free, available
            );
            return Err(MemoryError::OutOfMemory {
                requested: size,
                largest_free,
                available,
            });
        };

        if self.blocks.position_of_owner(owner.as_str()).is_some() {
            debug!(owner = %owner, "Owner already holds a block; allocating another");
        }

        let candidate_size = self.blocks.as_slice()[index].size;
        if candidate_size > size {
            self.blocks.split_at(index, size)?;
        }

        let block = self.blocks.block_mut(index);
        block.assign(owner);
        let allocated = AllocatedBlock {
            address: block.address,
            size: block.size,
        };

        self.debug_check();
        self.log_allocation(&allocated, strategy, candidate_size);
        Ok(allocated)
    }

    /// String-typed entry point for collaborators
    ///
    /// Validates the strategy tag, then the size, then the owner id, and allocates.
    pub fn request(
        &mut self,
        owner: &str,
        size: Size,
        strategy: &str,
    ) -> MemoryResult<AllocatedBlock> {
        let strategy: Strategy = strategy.parse()?;
        if size == 0 {
            return Err(MemoryError::InvalidRequest { size });
        }
        let owner = OwnerId::new(owner)?;
        self.allocate(owner, size, strategy)
    }

    fn log_allocation(&self, allocated: &AllocatedBlock, strategy: Strategy, from_block: Size) {
        let used = self.blocks.allocated_bytes();
        let total = self.blocks.total_size();
        let ratio = used as f64 / total as f64;

        match MemoryPressure::from_usage(ratio) {
            MemoryPressure::Low => info!(
                address = allocated.address,
                size = allocated.size,
                %strategy,
                "Allocated {} bytes at 0x{:x} from a {} byte free block",
                allocated.size, allocated.address, from_block
            ),
            level => warn!(
                address = allocated.address,
                size = allocated.size,
                %strategy,
                "Memory pressure {}: allocated {} bytes at 0x{:x} ({:.1}% used: {} / {})",
                level,
                allocated.size,
                allocated.address,
                ratio * 100.0,
                used,
                total
            ),
        }
    }
}
