//! Command modules for the emmyjar CLI
//!
//! Each module implements one top-level command:
//! - `generate` - full pipeline: collect, parse, build, emit, write
//! - `inspect` - parse and print the declaration model, write nothing
//!
//! Command handlers take their `Args` struct from `cli.rs` and a shared
//! `CommandContext` for output format and verbosity.

pub mod generate;
pub mod inspect;

pub use generate::run_generate;
pub use inspect::run_inspect;

use crate::cli::OutputFormat;

/// Shared context passed to all command handlers
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Output format (text or json)
    pub format: OutputFormat,
    /// Show verbose output
    pub verbose: bool,
}

impl Default for CommandContext {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            verbose: false,
        }
    }
}

impl CommandContext {
    /// Create a new CommandContext from CLI args
    pub fn from_cli(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }
}
