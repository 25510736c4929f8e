/*!
 * Simulator Configuration
 * Command-line arguments with environment fallbacks
 */

use crate::core::limits::DEFAULT_PROMPT;
use crate::core::types::Size;
use clap::{Parser, ValueEnum};
use miette::Diagnostic;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid memory size: {0}")]
    #[diagnostic(
        code(config::invalid_memory_size),
        help("Pass the size of the simulated address space in bytes, e.g. `blocksim 1048576`.")
    )]
    InvalidMemorySize(Size),
}

/// How `STAT` prints the block list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StatusFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// One JSON object with blocks and statistics
    Json,
}

/// Contiguous memory allocation simulator
#[derive(Parser, Debug, Clone)]
#[command(name = "blocksim")]
#[command(about = "Simulate first/best/worst-fit allocation, coalescing and compaction")]
pub struct SimConfig {
    /// Size of the simulated address space in bytes
    #[arg(value_name = "MEMORY_SIZE_IN_BYTES", env = "BLOCKSIM_MEMORY_SIZE")]
    pub memory_size: Size,

    /// Interactive prompt
    #[arg(long, env = "BLOCKSIM_PROMPT", default_value = DEFAULT_PROMPT)]
    pub prompt: String,

    /// Output format of the STAT command
    #[arg(long, value_enum, env = "BLOCKSIM_STATUS_FORMAT", default_value_t = StatusFormat::Text)]
    pub status_format: StatusFormat,

    /// Emit logs as JSON
    #[arg(long, env = "BLOCKSIM_TRACE_JSON")]
    pub trace_json: bool,
}

impl SimConfig {
    /// Reject settings the simulator cannot start with
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.memory_size == 0 {
            return Err(ConfigError::InvalidMemorySize(self.memory_size));
        }
        Ok(self)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            memory_size: 0,
            prompt: DEFAULT_PROMPT.to_string(),
            status_format: StatusFormat::Text,
            trace_json: false,
        }
    }
}
