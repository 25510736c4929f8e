/*!
 * Shell Commands
 * Text grammar of the allocator prompt
 *
 *   RQ <pid> <size> <F|B|W>   request memory
 *   RL <pid>                  release memory
 *   C                         compact
 *   STAT                      show status
 *   X                         exit
 */

use crate::core::limits::MAX_COMMAND_LENGTH;
use crate::core::types::Size;
use miette::Diagnostic;
use thiserror::Error;

/// Grammar errors; reported to the user and never reach the memory manager
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    #[diagnostic(code(shell::unknown_command), help("Commands: RQ, RL, C, STAT, X"))]
    Unknown(String),

    #[error("Usage: {0}")]
    #[diagnostic(code(shell::usage))]
    Usage(&'static str),

    #[error("Command longer than {} characters", MAX_COMMAND_LENGTH)]
    #[diagnostic(code(shell::too_long))]
    TooLong,
}

const RQ_USAGE: &str = "RQ <process_id> <size> <F|B|W>";
const RL_USAGE: &str = "RL <process_id>";

/// A parsed shell command
///
/// Owner and strategy stay as raw text so the memory manager performs their validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Request {
        owner: String,
        size: Size,
        strategy: String,
    },
    Release {
        owner: String,
    },
    Compact,
    Status,
    Exit,
}

impl Command {
    /// Parse one input line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.len() > MAX_COMMAND_LENGTH {
            return Err(CommandError::TooLong);
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match verb {
            "RQ" => match args {
                [owner, size, strategy] => Command::Request {
                    owner: owner.to_string(),
                    size: size.parse().map_err(|_| CommandError::Usage(RQ_USAGE))?,
                    strategy: strategy.to_string(),
                },
                _ => return Err(CommandError::Usage(RQ_USAGE)),
            },
            "RL" => match args {
                [owner] => Command::Release {
                    owner: owner.to_string(),
                },
                _ => return Err(CommandError::Usage(RL_USAGE)),
            },
            "C" => Command::Compact,
            "STAT" => Command::Status,
            "X" => Command::Exit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Command::Request { .. } => "RQ",
            Command::Release { .. } => "RL",
            Command::Compact => "C",
            Command::Status => "STAT",
            Command::Exit => "X",
        }
    }
}
