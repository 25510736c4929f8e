/*!
 * Memory Types
 * Common types for block bookkeeping
 */

use crate::core::limits::{
    OWNER_ID_MAX_LEN, PRESSURE_CRITICAL_THRESHOLD, PRESSURE_HIGH_THRESHOLD,
    PRESSURE_MEDIUM_THRESHOLD,
};
use crate::core::types::{Address, Size};
use crate::core::OwnerId;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// Every variant is recoverable: a failing operation leaves the block list untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum MemoryError {
    #[error("Invalid allocation strategy '{0}'")]
    #[diagnostic(
        code(memory::invalid_strategy),
        help("Use one of: first (F), best (B), worst (W).")
    )]
    InvalidStrategy(String),

    #[error("Invalid allocation request: size must be positive, got {size}")]
    #[diagnostic(
        code(memory::invalid_request),
        help("Request at least one byte.")
    )]
    InvalidRequest { size: Size },

    #[error("Invalid owner id '{owner}': {reason}")]
    #[diagnostic(
        code(memory::invalid_owner),
        help(
            "Owner ids are 1 to {} characters without whitespace.",
            OWNER_ID_MAX_LEN
        )
    )]
    InvalidOwner { owner: String, reason: String },

    #[error(
        "Out of memory: requested {requested} bytes, largest free block {largest_free} bytes \
         ({available} bytes free in total)"
    )]
    #[diagnostic(
        code(memory::out_of_memory),
        help("Release memory or compact to merge fragmented free space.")
    )]
    OutOfMemory {
        requested: Size,
        largest_free: Size,
        available: Size,
    },

    #[error("Process {0} not found or has no allocated memory.")]
    #[diagnostic(
        code(memory::not_found),
        help("Check the owner id; it may already have been released.")
    )]
    NotFound(String),

    #[error("Failed to allocate block metadata during {context}")]
    #[diagnostic(
        code(memory::metadata_allocation_failed),
        help("The host is low on memory. The simulation state is unchanged and remains usable.")
    )]
    AllocationMetadataFailure { context: String },
}

/// Memory block metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBlock {
    pub address: Address,
    pub size: Size,
    pub allocated: bool,
    pub owner: Option<OwnerId>,
}

impl MemoryBlock {
    pub fn free(address: Address, size: Size) -> Self {
        Self {
            address,
            size,
            allocated: false,
            owner: None,
        }
    }

    pub fn allocated(address: Address, size: Size, owner: OwnerId) -> Self {
        Self {
            address,
            size,
            allocated: true,
            owner: Some(owner),
        }
    }

    /// One past the last address covered by this block
    #[inline]
    pub fn end(&self) -> Address {
        self.address + self.size
    }

    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.allocated
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        !self.allocated
    }

    pub fn is_owned_by(&self, owner: &str) -> bool {
        self.allocated && self.owner.as_ref().map_or(false, |o| o.as_str() == owner)
    }

    pub fn assign(&mut self, owner: OwnerId) {
        self.allocated = true;
        self.owner = Some(owner);
    }

    pub fn release(&mut self) {
        self.allocated = false;
        self.owner = None;
    }

    pub fn descriptor(&self) -> BlockDescriptor {
        BlockDescriptor {
            address: self.address,
            size: self.size,
            allocated: self.allocated,
            owner: self.owner.clone(),
        }
    }
}

/// Read-only copy of a block handed out by `snapshot`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    pub address: Address,
    pub size: Size,
    pub allocated: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub owner: Option<OwnerId>,
}

impl BlockDescriptor {
    /// Inclusive last address, as shown in status listings
    #[inline]
    pub fn last_address(&self) -> Address {
        self.address + self.size - 1
    }
}

/// Handle for a successful allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatedBlock {
    pub address: Address,
    pub size: Size,
}

/// Extent of a block as it was before release-time coalescing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasedBlock {
    pub address: Address,
    pub size: Size,
}

/// Outcome of a compaction pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompactionReport {
    /// Allocated blocks whose address changed
    pub moved_blocks: usize,
    /// Free blocks present before compaction
    pub free_blocks_before: usize,
    /// Size of the single trailing free block afterwards (0 if memory is full)
    pub reclaimed_bytes: Size,
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: Size,
    pub used_memory: Size,
    pub available_memory: Size,
    pub usage_percentage: f64,
    pub allocated_blocks: usize,
    pub free_blocks: usize,
    pub largest_free_block: Size,
    /// 0.0 when all free space is one block, approaching 1.0 as it scatters
    pub fragmentation: f64,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        MemoryPressure::from_usage(self.usage_percentage / 100.0)
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    pub fn from_usage(ratio: f64) -> Self {
        if ratio >= PRESSURE_CRITICAL_THRESHOLD {
            MemoryPressure::Critical
        } else if ratio >= PRESSURE_HIGH_THRESHOLD {
            MemoryPressure::High
        } else if ratio >= PRESSURE_MEDIUM_THRESHOLD {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl std::fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}
