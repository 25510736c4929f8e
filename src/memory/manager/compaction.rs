/*!
 * Memory Compaction
 * Slides allocated blocks to the front of the address space
 */

use super::super::types::{CompactionReport, MemoryBlock, MemoryResult};
use super::MemoryManager;
use tracing::info;

impl MemoryManager {
    /// Relocate all allocated blocks to be contiguous from offset 0
    ///
    /// Order, sizes and owners are kept; addresses change. Afterwards at most one free
    /// block remains, at the end.
    pub fn compact(&mut self) -> MemoryResult<CompactionReport> {
        info!("Compacting memory...");

        let free_blocks_before = self.blocks.free_block_count();
        let allocated: Vec<MemoryBlock> = self
            .blocks
            .iter()
            .filter(|b| b.is_allocated())
            .cloned()
            .collect();
        let old_addresses: Vec<_> = allocated.iter().map(|b| b.address).collect();

        self.blocks.rebuild(allocated)?;
        self.debug_check();

        let moved_blocks = self
            .blocks
            .iter()
            .zip(&old_addresses)
            .filter(|&(block, &old)| block.address != old)
            .count();
        let reclaimed_bytes = self
            .blocks
            .as_slice()
            .last()
            .filter(|b| b.is_free())
            .map_or(0, |b| b.size);

        let report = CompactionReport {
            moved_blocks,
            free_blocks_before,
            reclaimed_bytes,
        };
        info!(
            moved_blocks,
            free_blocks_before,
            reclaimed_bytes,
            "Memory compaction complete"
        );
        Ok(report)
    }
}
