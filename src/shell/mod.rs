/*!
 * Allocator Shell
 *
 * Interactive front end over the memory manager. It parses the command grammar,
 * forwards each request to the manager and prints the result; it holds no
 * allocation logic of its own.
 */

pub mod command;
pub mod render;

pub use command::{Command, CommandError};
pub use render::{render_json, render_text, StatusReport};

use crate::config::{SimConfig, StatusFormat};
use crate::core::types::Size;
use crate::memory::{MemoryError, MemoryManager};
use crate::monitoring::span_command;
use miette::Diagnostic;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by the shell
#[derive(Error, Debug, Diagnostic)]
pub enum ShellError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Memory(#[from] MemoryError),

    #[error("Not enough memory to allocate {requested} bytes for process {owner}")]
    #[diagnostic(
        code(shell::no_memory),
        help("Release memory or compact to merge fragmented free space.")
    )]
    NoMemory { owner: String, requested: Size },

    #[error("Failed to render status: {0}")]
    #[diagnostic(code(shell::render))]
    Render(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    #[diagnostic(code(shell::io))]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Errors the user can correct at the prompt; everything else ends the session
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ShellError::Command(_) | ShellError::Memory(_) | ShellError::NoMemory { .. }
        )
    }
}

/// Print a user-facing error; usage hints are printed without the `Error:` prefix
fn report<W: Write>(out: &mut W, error: &ShellError) -> io::Result<()> {
    match error {
        ShellError::Command(CommandError::Usage(usage)) => writeln!(out, "Usage: {}", usage),
        other => writeln!(out, "Error: {}", other),
    }
}

/// Whether the loop keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// One interactive session over a memory manager
pub struct Shell {
    memory: MemoryManager,
    prompt: String,
    status_format: StatusFormat,
}

impl Shell {
    pub fn new(memory: MemoryManager, config: &SimConfig) -> Self {
        Self {
            memory,
            prompt: config.prompt.clone(),
            status_format: config.status_format,
        }
    }

    pub fn memory(&self) -> &MemoryManager {
        &self.memory
    }

    /// Run one parsed command, writing its report to `out`
    pub fn execute<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<Outcome, ShellError> {
        match command {
            Command::Request {
                owner,
                size,
                strategy,
            } => {
                let block = self
                    .memory
                    .request(&owner, size, &strategy)
                    .map_err(|e| match e {
                        MemoryError::OutOfMemory { requested, .. } => ShellError::NoMemory {
                            owner: owner.clone(),
                            requested,
                        },
                        other => other.into(),
                    })?;
                writeln!(
                    out,
                    "Allocated {} bytes to process {} at address {}",
                    block.size, owner, block.address
                )?;
            }
            Command::Release { owner } => {
                let block = self.memory.release(&owner)?;
                writeln!(
                    out,
                    "Released memory allocated to process {} at address {}, size {} bytes",
                    owner, block.address, block.size
                )?;
            }
            Command::Compact => {
                writeln!(out, "Compacting memory...")?;
                self.memory.compact()?;
                writeln!(out, "Memory compaction complete.")?;
            }
            Command::Status => match self.status_format {
                StatusFormat::Text => write!(out, "{}", render_text(&self.memory))?,
                StatusFormat::Json => writeln!(out, "{}", render_json(&self.memory)?)?,
            },
            Command::Exit => {
                writeln!(out, "Exiting.")?;
                return Ok(Outcome::Exit);
            }
        }
        Ok(Outcome::Continue)
    }

    /// Parse and execute one line; user errors are printed and the session continues
    pub fn handle_line<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
    ) -> Result<Outcome, ShellError> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Outcome::Continue),
            Err(e) => {
                report(out, &ShellError::from(e))?;
                return Ok(Outcome::Continue);
            }
        };

        let span = span_command(command.verb());
        let result = span.in_scope(|| self.execute(command, out));
        span.record_result(result.is_ok());

        match result {
            Err(e) if e.is_recoverable() => {
                debug!(error = %e, "Command failed");
                report(out, &e)?;
                Ok(Outcome::Continue)
            }
            other => other,
        }
    }

    /// Prompt loop until `X` or end of input
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut out: W,
    ) -> Result<(), ShellError> {
        let mut line = String::new();
        loop {
            write!(out, "{}", self.prompt)?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out, "\nExiting.")?;
                break;
            }

            if self.handle_line(&line, &mut out)? == Outcome::Exit {
                break;
            }
        }
        out.flush()?;
        Ok(())
    }
}
