//! Command-line interface for check-commit-size
//!
//! The hook takes a handful of flags, builds a [`CheckConfig`] from them and
//! hands off to the limit checker. The process exit code is the checker's
//! verdict.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use crate::config::{CheckConfig, DEFAULT_EXCLUDE, DEFAULT_MAX_ADDITIONS};
use crate::git::GitCli;
use crate::hooks::commit_size;

mod output;

pub use output::Output;

/// Check commit size limits
#[derive(Parser, Debug)]
#[command(
    name = "check-commit-size",
    version = env!("CARGO_PKG_VERSION"),
    about = "Check commit size limits",
    after_help = "Examples:\n  \
        # Check that additions don't exceed 1000 lines\n  \
        check-commit-size --max-additions 1000\n\n  \
        # Check that deletions don't exceed 500 lines\n  \
        check-commit-size --max-deletions 500\n\n  \
        # Check both additions and deletions\n  \
        check-commit-size --max-additions 1000 --max-deletions 500"
)]
pub struct Cli {
    /// Maximum number of additions allowed
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_ADDITIONS)]
    pub max_additions: u64,

    /// Do not limit additions
    #[arg(long, conflicts_with = "max_additions")]
    pub no_max_additions: bool,

    /// Maximum number of deletions allowed
    #[arg(long, value_name = "N")]
    pub max_deletions: Option<u64>,

    /// Files not to consider for computing the diff size.
    ///
    /// Takes every value up to the next flag, so pass filenames before it or
    /// end the pattern list with `--`.
    #[arg(long, value_name = "GLOB", num_args = 0.., default_value = DEFAULT_EXCLUDE)]
    pub exclude: Vec<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress warnings and logging; errors are always shown
    #[arg(short, long)]
    pub quiet: bool,

    /// Filenames passed by the hook runner (not used for the size check)
    #[arg(value_name = "FILENAMES")]
    pub filenames: Vec<String>,
}

impl Cli {
    /// Run the hook and turn its verdict into a process exit code
    pub fn run(self) -> Result<ExitCode> {
        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);

        if !self.filenames.is_empty() {
            tracing::debug!(
                count = self.filenames.len(),
                "ignoring filenames passed by the hook runner"
            );
        }

        let config = CheckConfig::from(&self);
        let verdict = commit_size::check(&config, &GitCli::new(), &output)?;

        Ok(ExitCode::from(verdict.exit_code()))
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,globset=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // stdout stays unused; a second init (tests) is ignored
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
