/*!
 * Block List
 * Address-ordered, gap-free sequence of blocks covering the whole address space
 */

use super::types::{MemoryBlock, MemoryError, MemoryResult};
use crate::core::types::{Address, Size};
use thiserror::Error;
use tracing::debug;

/// Structural defect found by [`BlockList::check_invariants`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("block list is empty but total size is {total}")]
    Empty { total: Size },

    #[error("first block starts at 0x{address:x} instead of 0")]
    MisalignedStart { address: Address },

    #[error("block {index} has zero size")]
    ZeroSize { index: usize },

    #[error("block {index} starts at 0x{found:x}, expected 0x{expected:x}")]
    Discontiguous {
        index: usize,
        expected: Address,
        found: Address,
    },

    #[error("blocks cover {covered} bytes of a {total} byte address space")]
    CoverageMismatch { covered: Size, total: Size },

    #[error("blocks {index} and {} are both free", index + 1)]
    AdjacentFree { index: usize },

    #[error("block {index} ownership does not match its allocation state")]
    OwnerMismatch { index: usize },
}

/// Ordered block sequence over `[0, total_size)`
///
/// Blocks are kept in a contiguous `Vec` sorted by address; splitting and merging are
/// plain inserts and removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockList {
    blocks: Vec<MemoryBlock>,
    total_size: Size,
}

impl BlockList {
    /// Create a list holding one free block that spans the whole space
    pub fn new(total_size: Size) -> Self {
        let blocks = if total_size > 0 {
            vec![MemoryBlock::free(0, total_size)]
        } else {
            Vec::new()
        };
        Self { blocks, total_size }
    }

    #[inline]
    pub fn total_size(&self) -> Size {
        self.total_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&MemoryBlock> {
        self.blocks.get(index)
    }

    /// Mutable access for the manager; `index` must come from a lookup on this list
    #[inline]
    pub(crate) fn block_mut(&mut self, index: usize) -> &mut MemoryBlock {
        &mut self.blocks[index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MemoryBlock> {
        self.blocks.iter()
    }

    pub fn as_slice(&self) -> &[MemoryBlock] {
        &self.blocks
    }

    pub fn free_block_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_free()).count()
    }

    pub fn allocated_block_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_allocated()).count()
    }

    pub fn allocated_bytes(&self) -> Size {
        self.blocks
            .iter()
            .filter(|b| b.is_allocated())
            .map(|b| b.size)
            .sum()
    }

    pub fn free_bytes(&self) -> Size {
        self.total_size - self.allocated_bytes()
    }

    pub fn largest_free_block(&self) -> Size {
        self.blocks
            .iter()
            .filter(|b| b.is_free())
            .map(|b| b.size)
            .max()
            .unwrap_or(0)
    }

    /// Index of the first allocated block owned by `owner`, in address order
    pub fn position_of_owner(&self, owner: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.is_owned_by(owner))
    }

    /// Split block `index` into `[start, start+offset)` and `[start+offset, end)`
    ///
    /// Both halves inherit the original allocation state; the caller overrides the
    /// first half right after. Metadata space is reserved up front, so a host
    /// allocation failure leaves the list untouched.
    pub fn split_at(&mut self, index: usize, offset: Size) -> MemoryResult<()> {
        let block = &self.blocks[index];
        debug_assert!(
            offset > 0 && offset < block.size,
            "split offset {} outside block of {} bytes",
            offset,
            block.size
        );

        reserve_blocks(&mut self.blocks, 1, "block split")?;

        let block = &mut self.blocks[index];
        let remainder = MemoryBlock {
            address: block.address + offset,
            size: block.size - offset,
            allocated: block.allocated,
            owner: block.owner.clone(),
        };
        block.size = offset;

        debug!(
            address = remainder.address,
            size = remainder.size,
            "Split block: keeping {} bytes at 0x{:x}",
            offset,
            self.blocks[index].address
        );
        self.blocks.insert(index + 1, remainder);
        Ok(())
    }

    /// Merge every run of consecutive free blocks; returns the number of merges
    pub fn coalesce_adjacent(&mut self) -> usize {
        let before = self.blocks.len();
        self.blocks.dedup_by(|next, prev| {
            if prev.is_free() && next.is_free() {
                prev.size += next.size;
                true
            } else {
                false
            }
        });

        let merged = before - self.blocks.len();
        if merged > 0 {
            debug!(
                "Coalesced {} pairs of adjacent free blocks, reduced from {} to {} blocks",
                merged,
                before,
                self.blocks.len()
            );
        }
        merged
    }

    /// Merge block `index` with its free neighbours; returns the surviving block's index
    ///
    /// After a single release only the immediate neighbours can be free, so this has
    /// the same effect as [`coalesce_adjacent`](Self::coalesce_adjacent).
    pub fn coalesce_around(&mut self, index: usize) -> usize {
        let mut index = index;
        if !self.blocks[index].is_free() {
            return index;
        }

        if index + 1 < self.blocks.len() && self.blocks[index + 1].is_free() {
            let next = self.blocks.remove(index + 1);
            self.blocks[index].size += next.size;
            debug!(address = self.blocks[index].address, "Merged with right neighbour");
        }

        if index > 0 && self.blocks[index - 1].is_free() {
            let current = self.blocks.remove(index);
            index -= 1;
            self.blocks[index].size += current.size;
            debug!(address = self.blocks[index].address, "Merged with left neighbour");
        }

        index
    }

    /// Replace the list with `allocated` laid back-to-back from offset 0
    ///
    /// Incoming addresses are ignored. One trailing free block covers the remainder
    /// and is omitted when the allocated blocks fill the space exactly.
    pub fn rebuild(&mut self, allocated: Vec<MemoryBlock>) -> MemoryResult<()> {
        let mut rebuilt = Vec::new();
        reserve_blocks(&mut rebuilt, allocated.len() + 1, "compaction")?;

        let mut cursor: Address = 0;
        for mut block in allocated {
            debug_assert!(block.is_allocated(), "rebuild given a free block");
            block.address = cursor;
            cursor += block.size;
            rebuilt.push(block);
        }
        debug_assert!(
            cursor <= self.total_size,
            "rebuild overflows address space: {} > {}",
            cursor,
            self.total_size
        );

        if cursor < self.total_size {
            rebuilt.push(MemoryBlock::free(cursor, self.total_size - cursor));
        }

        self.blocks = rebuilt;
        Ok(())
    }

    /// Verify coverage, ordering, coalescing and ownership invariants
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.blocks.is_empty() {
            return if self.total_size == 0 {
                Ok(())
            } else {
                Err(InvariantViolation::Empty {
                    total: self.total_size,
                })
            };
        }

        if self.blocks[0].address != 0 {
            return Err(InvariantViolation::MisalignedStart {
                address: self.blocks[0].address,
            });
        }

        let mut expected: Address = 0;
        for (index, block) in self.blocks.iter().enumerate() {
            if block.size == 0 {
                return Err(InvariantViolation::ZeroSize { index });
            }
            if block.address != expected {
                return Err(InvariantViolation::Discontiguous {
                    index,
                    expected,
                    found: block.address,
                });
            }
            if block.allocated != block.owner.is_some() {
                return Err(InvariantViolation::OwnerMismatch { index });
            }
            expected = block.end();
        }

        if expected != self.total_size {
            return Err(InvariantViolation::CoverageMismatch {
                covered: expected,
                total: self.total_size,
            });
        }

        if let Some(index) = self
            .blocks
            .windows(2)
            .position(|pair| pair[0].is_free() && pair[1].is_free())
        {
            return Err(InvariantViolation::AdjacentFree { index });
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a BlockList {
    type Item = &'a MemoryBlock;
    type IntoIter = std::slice::Iter<'a, MemoryBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

#[cfg(test)]
impl BlockList {
    /// Build a list from raw blocks (tests only; no validation)
    pub(crate) fn from_blocks(blocks: Vec<MemoryBlock>) -> Self {
        let total_size = blocks.iter().map(|b| b.size).sum();
        Self { blocks, total_size }
    }
}

/// Reserve room for `additional` blocks, reporting host exhaustion as a memory error
fn reserve_blocks(
    blocks: &mut Vec<MemoryBlock>,
    additional: usize,
    context: &str,
) -> MemoryResult<()> {
    blocks
        .try_reserve(additional)
        .map_err(|_| MemoryError::AllocationMetadataFailure {
            context: context.to_string(),
        })
}
