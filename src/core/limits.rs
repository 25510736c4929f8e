/*!
 * System Limits and Constants
 *
 * Centralized location for simulator-wide limits and thresholds.
 * Grouped by domain.
 */

// =============================================================================
// OWNER IDENTIFIERS
// =============================================================================

/// Maximum length of an owner (process) identifier in characters
pub const OWNER_ID_MAX_LEN: usize = 9;

// =============================================================================
// MEMORY PRESSURE
// =============================================================================

/// Usage ratio at which pressure is reported as MEDIUM
pub const PRESSURE_MEDIUM_THRESHOLD: f64 = 0.60;

/// Usage ratio at which pressure is reported as HIGH
pub const PRESSURE_HIGH_THRESHOLD: f64 = 0.80;

/// Usage ratio at which pressure is reported as CRITICAL
pub const PRESSURE_CRITICAL_THRESHOLD: f64 = 0.95;

// =============================================================================
// SHELL
// =============================================================================

/// Longest command line the shell accepts (bytes, excluding the newline)
pub const MAX_COMMAND_LENGTH: usize = 64;

/// Default interactive prompt
pub const DEFAULT_PROMPT: &str = "allocator> ";
