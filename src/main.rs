use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use check_commit_size::Cli;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    cli.run()
}
