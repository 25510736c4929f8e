/*!
 * Memory Release
 * Freeing owner blocks and merging them with free neighbours
 */

use super::super::types::{MemoryError, MemoryResult, ReleasedBlock};
use super::MemoryManager;
use tracing::{debug, info, warn};

impl MemoryManager {
    /// Release the first block (address order) owned by `owner`
    ///
    /// The returned extent is the block as it was before coalescing.
    pub fn release(&mut self, owner: &str) -> MemoryResult<ReleasedBlock> {
        let Some(index) = self.blocks.position_of_owner(owner) else {
            warn!(owner, "Process not found or has no allocated memory");
            return Err(MemoryError::NotFound(owner.to_string()));
        };

        let block = self.blocks.block_mut(index);
        let released = ReleasedBlock {
            address: block.address,
            size: block.size,
        };
        block.release();

        let survivor = self.blocks.coalesce_around(index);
        self.debug_check();

        info!(
            owner,
            address = released.address,
            size = released.size,
            "Released {} bytes at 0x{:x}",
            released.size,
            released.address
        );
        if let Some(merged) = self.blocks.get(survivor) {
            if merged.size != released.size {
                debug!(
                    address = merged.address,
                    size = merged.size,
                    "Free block after coalescing spans {} bytes",
                    merged.size
                );
            }
        }

        Ok(released)
    }

    /// Release every block owned by `owner`, lowest address first
    ///
    /// Fails with `NotFound` only when the owner holds nothing.
    pub fn release_all(&mut self, owner: &str) -> MemoryResult<Vec<ReleasedBlock>> {
        let mut released = Vec::new();
        while self.blocks.position_of_owner(owner).is_some() {
            released.push(self.release(owner)?);
        }

        if released.is_empty() {
            return Err(MemoryError::NotFound(owner.to_string()));
        }
        info!(
            owner,
            count = released.len(),
            "Released all blocks of owner"
        );
        Ok(released)
    }
}
