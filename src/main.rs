/*!
 * blocksim - Main Entry Point
 *
 * Interactive contiguous memory allocation simulator:
 * - First-fit, best-fit and worst-fit placement
 * - Release with coalescing of adjacent free blocks
 * - Full compaction
 */

use blocksim::{init_tracing, MemoryManager, Shell, SimConfig};
use clap::Parser;
use miette::IntoDiagnostic;
use std::io;
use tracing::info;

fn main() -> miette::Result<()> {
    let config = SimConfig::parse().validate()?;

    // Initialize structured tracing
    init_tracing(config.trace_json);

    info!(
        memory_size = config.memory_size,
        status_format = ?config.status_format,
        "blocksim starting"
    );

    let memory = MemoryManager::with_capacity(config.memory_size);
    let mut shell = Shell::new(memory, &config);

    let stdin = io::stdin();
    shell.run(stdin.lock(), io::stdout().lock())?;

    let (total, used, _) = shell.memory().info();
    info!(total, used, "Session finished");
    io::Write::flush(&mut io::stdout()).into_diagnostic()?;
    Ok(())
}
