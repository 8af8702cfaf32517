//! Hook configuration
//!
//! The hook is configured from command-line flags only. [`CheckConfig`] is
//! built once per run and never mutated.

use crate::cli::Cli;

/// Default maximum number of added lines
pub const DEFAULT_MAX_ADDITIONS: u64 = 500;

/// Default exclude pattern
pub const DEFAULT_EXCLUDE: &str = "*.csv";

/// Limits and exclusions for a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Glob patterns for files left out of the totals
    pub exclude_patterns: Vec<String>,

    /// Maximum number of added lines, `None` for no limit
    pub max_additions: Option<u64>,

    /// Maximum number of deleted lines, `None` for no limit
    pub max_deletions: Option<u64>,
}

impl CheckConfig {
    /// Whether at least one limit is configured
    pub fn has_limits(&self) -> bool {
        self.max_additions.is_some() || self.max_deletions.is_some()
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            exclude_patterns: vec![DEFAULT_EXCLUDE.to_string()],
            max_additions: Some(DEFAULT_MAX_ADDITIONS),
            max_deletions: None,
        }
    }
}

impl From<&Cli> for CheckConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            exclude_patterns: cli.exclude.clone(),
            max_additions: (!cli.no_max_additions).then_some(cli.max_additions),
            max_deletions: cli.max_deletions,
        }
    }
}
