//! # check-commit-size
//!
//! A pre-commit hook that keeps commits small. It reads the staged diff
//! summary from `git diff --cached --numstat`, sums the added and deleted
//! lines (skipping files that match the exclude globs) and fails when a
//! configured maximum is exceeded.
//!
//! ## Quick Start
//!
//! ```bash
//! # Fail the commit when more than 1000 lines are added
//! check-commit-size --max-additions 1000
//!
//! # Limit both sides and ignore generated fixtures
//! check-commit-size --max-additions 1000 --max-deletions 500 --exclude '*.csv' 'fixtures/*'
//! ```
//!
//! Errors while collecting stats never block a commit: the collector reports
//! them and falls back to zero stats.

pub mod cli;
pub mod config;
pub mod git;
pub mod hooks;
pub mod shared;
pub mod stats;

pub use cli::{Cli, Output};
pub use config::CheckConfig;
pub use hooks::commit_size::{LimitViolation, Verdict};
pub use stats::DiffStats;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
