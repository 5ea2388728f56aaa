//! emmyjar CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use emmyjar::commands::{run_generate, run_inspect, CommandContext};
use emmyjar::{Cli, Commands};

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    match run() {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> emmyjar::Result<String> {
    let cli = Cli::parse();
    let ctx = CommandContext::from_cli(cli.format, cli.verbose);

    match &cli.command {
        Commands::Generate(args) => run_generate(&ctx, args),
        Commands::Inspect(args) => run_inspect(&ctx, args),
    }
}
