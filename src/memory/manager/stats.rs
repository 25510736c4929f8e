/*!
 * Memory Statistics
 * Snapshots and usage figures for status rendering
 */

use super::super::types::{BlockDescriptor, MemoryStats};
use super::MemoryManager;
use crate::core::types::Size;

impl MemoryManager {
    /// Ordered copy of every block
    pub fn snapshot(&self) -> Vec<BlockDescriptor> {
        self.blocks.iter().map(|b| b.descriptor()).collect()
    }

    pub fn stats(&self) -> MemoryStats {
        let total_memory = self.blocks.total_size();
        let used_memory = self.blocks.allocated_bytes();
        let available_memory = total_memory - used_memory;
        let largest_free_block = self.blocks.largest_free_block();

        let usage_percentage = if total_memory > 0 {
            (used_memory as f64 / total_memory as f64) * 100.0
        } else {
            0.0
        };
        let fragmentation = if available_memory > 0 {
            1.0 - largest_free_block as f64 / available_memory as f64
        } else {
            0.0
        };

        MemoryStats {
            total_memory,
            used_memory,
            available_memory,
            usage_percentage,
            allocated_blocks: self.blocks.allocated_block_count(),
            free_blocks: self.blocks.free_block_count(),
            largest_free_block,
            fragmentation,
        }
    }

    /// Memory info as (total, used, available)
    pub fn info(&self) -> (Size, Size, Size) {
        let total = self.blocks.total_size();
        let used = self.blocks.allocated_bytes();
        (total, used, total - used)
    }

    /// Blocks currently held by `owner`, in address order
    pub fn owner_blocks(&self, owner: &str) -> Vec<BlockDescriptor> {
        self.blocks
            .iter()
            .filter(|b| b.is_owned_by(owner))
            .map(|b| b.descriptor())
            .collect()
    }

    pub fn owner_memory(&self, owner: &str) -> Size {
        self.blocks
            .iter()
            .filter(|b| b.is_owned_by(owner))
            .map(|b| b.size)
            .sum()
    }
}
