/*!
 * Core Types
 * Common types used across the simulator
 */

/// Offset within the simulated address space
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;
