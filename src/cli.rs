//! CLI argument definitions using clap with subcommand architecture

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// EmmyLua annotation stub generator for Java APIs
#[derive(Parser, Debug)]
#[command(name = "emmyjar")]
#[command(about = "Generate EmmyLua annotation stubs from Java source jars or directories")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (applies to all commands)
    #[arg(short, long, default_value = "text", value_enum, global = true)]
    pub format: OutputFormat,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands for emmyjar
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate stub files and the imports index
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Parse inputs and print the declaration model without writing stubs
    #[command(visible_alias = "i")]
    Inspect(InspectArgs),
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Source jars, zips, directories, or .java files
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory to write stub files into (created if missing)
    #[arg(long, value_name = "DIR", default_value = "./stubs")]
    pub output_dir: PathBuf,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Source jars, zips, directories, or .java files
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Only show declarations whose qualified name contains this text
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,
}

/// Output format for command reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Machine-readable JSON
    Json,
}
