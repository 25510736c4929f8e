/*!
 * Status Rendering
 * Human-readable and JSON views of a memory snapshot
 */

use crate::memory::{BlockDescriptor, MemoryInfo, MemoryStats};
use serde::Serialize;
use std::fmt::Write;

/// JSON shape of the STAT command
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub blocks: Vec<BlockDescriptor>,
    pub stats: MemoryStats,
}

impl StatusReport {
    pub fn capture(memory: &impl MemoryInfo) -> Self {
        Self {
            blocks: memory.snapshot(),
            stats: memory.stats(),
        }
    }
}

/// Text listing, one line per block in address order
pub fn render_text(memory: &impl MemoryInfo) -> String {
    let blocks = memory.snapshot();
    let (total, _, _) = memory.info();

    let mut out = String::from("Memory Status:\n");
    for (i, block) in blocks.iter().enumerate() {
        let status = block.owner.as_ref().map_or("Free", |o| o.as_str());
        let _ = write!(
            out,
            "Address [{} - {}] Size: {} bytes, Status: {}",
            block.address,
            block.last_address(),
            block.size,
            status
        );
        if i + 1 < blocks.len() {
            out.push_str(" -> ");
        }
        out.push('\n');
    }
    let _ = writeln!(out, "Total memory: {} bytes", total);
    out
}

pub fn render_json(memory: &impl MemoryInfo) -> serde_json::Result<String> {
    serde_json::to_string(&StatusReport::capture(memory))
}
