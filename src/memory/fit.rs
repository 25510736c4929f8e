/*!
 * Fit Selection
 * Placement strategies choosing a free block for a request
 */

use super::block_list::BlockList;
use super::types::MemoryError;
use crate::core::types::Size;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// Placement strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// First sufficiently large free block in address order
    First,
    /// Free block leaving the least leftover space
    Best,
    /// Free block leaving the most leftover space
    Worst,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::First, Strategy::Best, Strategy::Worst];

    /// Index of the block this strategy would allocate `request` bytes from
    pub fn select(self, blocks: &BlockList, request: Size) -> Option<usize> {
        match self {
            Strategy::First => first_fit(blocks, request),
            Strategy::Best => best_fit(blocks, request),
            Strategy::Worst => worst_fit(blocks, request),
        }
    }

    /// Single-letter shell tag
    pub fn tag(self) -> char {
        match self {
            Strategy::First => 'F',
            Strategy::Best => 'B',
            Strategy::Worst => 'W',
        }
    }
}

impl FromStr for Strategy {
    type Err = MemoryError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "f" | "first" => Ok(Strategy::First),
            "b" | "best" => Ok(Strategy::Best),
            "w" | "worst" => Ok(Strategy::Worst),
            _ => Err(MemoryError::InvalidStrategy(tag.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::First => write!(f, "first-fit"),
            Strategy::Best => write!(f, "best-fit"),
            Strategy::Worst => write!(f, "worst-fit"),
        }
    }
}

/// Free blocks of at least `request` bytes, with their indices, in address order
fn candidates(blocks: &BlockList, request: Size) -> impl Iterator<Item = (usize, Size)> + '_ {
    blocks
        .iter()
        .enumerate()
        .filter(move |(_, b)| b.is_free() && b.size >= request)
        .map(|(i, b)| (i, b.size))
}

pub fn first_fit(blocks: &BlockList, request: Size) -> Option<usize> {
    candidates(blocks, request).next().map(|(i, _)| i)
}

/// `min_by_key` keeps the first of equal minima, so ties go to the lowest address
pub fn best_fit(blocks: &BlockList, request: Size) -> Option<usize> {
    candidates(blocks, request)
        .min_by_key(|&(_, size)| size - request)
        .map(|(i, _)| i)
}

pub fn worst_fit(blocks: &BlockList, request: Size) -> Option<usize> {
    candidates(blocks, request)
        .max_by_key(|&(i, size)| (size, Reverse(i)))
        .map(|(i, _)| i)
}
