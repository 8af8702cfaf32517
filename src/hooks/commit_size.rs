//! Commit size hook
//!
//! Compares the staged diff stats against the configured maxima. Additions
//! are checked before deletions and only the first violation is reported.

use anyhow::Result;
use std::fmt;

use crate::cli::Output;
use crate::config::CheckConfig;
use crate::git::DiffSource;
use crate::stats::{self, DiffStats};

/// A limit the staged changes went over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitViolation {
    Additions { actual: u64, limit: u64 },
    Deletions { actual: u64, limit: u64 },
}

impl fmt::Display for LimitViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (actual, kind, limit) = match self {
            LimitViolation::Additions { actual, limit } => (actual, "additions", limit),
            LimitViolation::Deletions { actual, limit } => (actual, "deletions", limit),
        };
        write!(f, "Commit has {actual} {kind}, which exceeds the limit of {limit}")
    }
}

/// Outcome of a commit size check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No limits configured; stats were not collected
    Unlimited,
    /// Stats are within every configured limit
    Within(DiffStats),
    Exceeded(LimitViolation),
}

impl Verdict {
    pub fn exit_code(&self) -> u8 {
        match self {
            Verdict::Unlimited | Verdict::Within(_) => 0,
            Verdict::Exceeded(_) => 1,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.exit_code() == 0
    }
}

/// Find the first limit `stats` exceeds, additions first
pub fn first_violation(
    stats: DiffStats,
    max_additions: Option<u64>,
    max_deletions: Option<u64>,
) -> Option<LimitViolation> {
    if let Some(limit) = max_additions.filter(|&limit| stats.additions > limit) {
        return Some(LimitViolation::Additions {
            actual: stats.additions,
            limit,
        });
    }

    max_deletions
        .filter(|&limit| stats.deletions > limit)
        .map(|limit| LimitViolation::Deletions {
            actual: stats.deletions,
            limit,
        })
}

/// Check the staged changes against `config`
pub fn check(config: &CheckConfig, source: &dyn DiffSource, output: &Output) -> Result<Verdict> {
    if !config.has_limits() {
        tracing::debug!("no limits configured, skipping diff collection");
        return Ok(Verdict::Unlimited);
    }

    let stats = stats::collect_with_patterns(source, &config.exclude_patterns, output)?;

    match first_violation(stats, config.max_additions, config.max_deletions) {
        Some(violation) => {
            output.error(&violation.to_string());
            Ok(Verdict::Exceeded(violation))
        }
        None => {
            output.verbose(&format!(
                "Commit size within limits: {} additions, {} deletions",
                stats.additions, stats.deletions
            ));
            Ok(Verdict::Within(stats))
        }
    }
}
