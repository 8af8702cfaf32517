//! Staged diff statistics
//!
//! Collects the number of added and deleted lines in the staged changes from
//! the numeric diff summary git prints for `git diff --cached --numstat`:
//!
//! ```text
//! 10	5	src/main.rs
//! -	-	assets/logo.png
//! ```
//!
//! Binary files report `-` for both counts and contribute nothing. Lines
//! that do not have exactly three tab-separated fields, or whose counts are
//! not numbers, are skipped.

use anyhow::Result;

use crate::cli::Output;
use crate::git::DiffSource;
use crate::shared::ExcludeSet;

/// Marker git prints instead of a line count for binary files
const BINARY_MARKER: &str = "-";

/// Added and deleted line totals for the staged changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub additions: u64,
    pub deletions: u64,
}

impl DiffStats {
    pub fn new(additions: u64, deletions: u64) -> Self {
        Self {
            additions,
            deletions,
        }
    }
}

/// Result of parsing numstat output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumstatSummary {
    pub stats: DiffStats,

    /// Files left out of the totals by an exclude pattern, in output order
    pub excluded: Vec<String>,
}

/// Parse `git diff --numstat` output, skipping files matched by `exclude`
pub fn parse_numstat(text: &str, exclude: &ExcludeSet) -> NumstatSummary {
    let mut summary = NumstatSummary::default();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let [added, deleted, filename] = fields.as_slice() else {
            tracing::trace!(%line, "skipping line without three fields");
            continue;
        };

        if !exclude.is_empty() && exclude.is_excluded(filename) {
            summary.excluded.push(filename.to_string());
            continue;
        }

        let (Some(added), Some(deleted)) = (parse_count(added), parse_count(deleted)) else {
            tracing::trace!(%line, "skipping line with malformed counts");
            continue;
        };

        tracing::trace!(%filename, added, deleted, "counted");
        summary.stats.additions = summary.stats.additions.saturating_add(added);
        summary.stats.deletions = summary.stats.deletions.saturating_add(deleted);
    }

    summary
}

fn parse_count(field: &str) -> Option<u64> {
    let field = field.trim();
    if field == BINARY_MARKER {
        return Some(0);
    }
    field.parse().ok()
}

/// Collect stats for the staged changes.
///
/// Fails open: any error from `source` is reported and the stats fall back
/// to zero, so a broken git setup never blocks a commit on size grounds.
pub fn collect(source: &dyn DiffSource, exclude: &ExcludeSet, output: &Output) -> DiffStats {
    let text = match source.staged_numstat() {
        Ok(text) => text,
        Err(err) if err.is_command_failure() => {
            output.error(&format!("Failed to get git diff stats: {err}"));
            return DiffStats::default();
        }
        Err(err) => {
            output.error(&format!("Unexpected error getting commit stats: {err}"));
            return DiffStats::default();
        }
    };

    let summary = parse_numstat(&text, exclude);
    for filename in &summary.excluded {
        output.warning(&format!("{filename} is excluded"));
    }

    tracing::debug!(
        additions = summary.stats.additions,
        deletions = summary.stats.deletions,
        excluded = summary.excluded.len(),
        patterns = exclude.len(),
        "collected staged diff stats"
    );
    summary.stats
}

/// Compile `patterns` and collect stats with them
pub fn collect_with_patterns(
    source: &dyn DiffSource,
    patterns: &[String],
    output: &Output,
) -> Result<DiffStats> {
    let exclude = ExcludeSet::new(patterns)?;
    for pattern in exclude.unmatchable() {
        output.warning(&format!(
            "Exclude pattern '{pattern}' can never match and is ignored"
        ));
    }
    Ok(collect(source, &exclude, output))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;

    use crate::git::{DiffSource, GitError};

    /// Diff source returning canned output and counting calls
    pub struct FakeDiff {
        output: Option<String>,
        failure: fn() -> GitError,
        calls: Cell<usize>,
    }

    impl FakeDiff {
        pub fn ok(output: &str) -> Self {
            Self {
                output: Some(output.to_string()),
                failure: || unreachable!(),
                calls: Cell::new(0),
            }
        }

        pub fn failing(failure: fn() -> GitError) -> Self {
            Self {
                output: None,
                failure,
                calls: Cell::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.get()
        }
    }

    impl DiffSource for FakeDiff {
        fn staged_numstat(&self) -> Result<String, GitError> {
            self.calls.set(self.calls.get() + 1);
            match &self.output {
                Some(output) => Ok(output.clone()),
                None => Err((self.failure)()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeDiff;
    use super::*;
    use crate::git::GitError;

    fn excludes(patterns: &[&str]) -> ExcludeSet {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        ExcludeSet::new(&patterns).unwrap()
    }

    #[test]
    fn test_sums_well_formed_lines() {
        let summary = parse_numstat("10\t5\tfile1.txt\n20\t15\tfile2.py\n", &excludes(&[]));
        assert_eq!(summary.stats, DiffStats::new(30, 20));
        assert!(summary.excluded.is_empty());
    }

    #[test]
    fn test_binary_files_count_as_zero() {
        let text = "10\t5\tfile1.txt\n-\t-\tfile2.bin\n15\t8\tfile3.py\n";
        let summary = parse_numstat(text, &excludes(&[]));
        assert_eq!(summary.stats, DiffStats::new(25, 13));
    }

    #[test]
    fn test_empty_output() {
        let summary = parse_numstat("", &excludes(&[]));
        assert_eq!(summary.stats, DiffStats::default());
        let summary = parse_numstat("\n  \n\t\n", &excludes(&[]));
        assert_eq!(summary.stats, DiffStats::default());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let text = "\
10\t5\tgood.rs
not a numstat line
1\t2
3\t4\tfive\tfields
x\t1\tbad-added.rs
7\ty\tbad-deleted.rs
2\t3\tother.rs
";
        let summary = parse_numstat(text, &excludes(&[]));
        // bad-deleted.rs contributes nothing, not even its added count
        assert_eq!(summary.stats, DiffStats::new(12, 8));
    }

    #[test]
    fn test_excluded_files_are_reported_not_counted() {
        let text = "10\t5\tfile1.txt\n100\t50\tdata.csv\n3\t1\tfixtures/more.csv\n";
        let summary = parse_numstat(text, &excludes(&["*.csv"]));
        assert_eq!(summary.stats, DiffStats::new(10, 5));
        assert_eq!(summary.excluded, vec!["data.csv", "fixtures/more.csv"]);
    }

    #[test]
    fn test_exclusion_applies_before_count_parsing() {
        let summary = parse_numstat("?\t?\tdata.csv\n", &excludes(&["*.csv"]));
        assert_eq!(summary.stats, DiffStats::default());
        assert_eq!(summary.excluded, vec!["data.csv"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let summary = parse_numstat("4\t2\ta.txt\r\n6\t1\tb.txt\r\n", &excludes(&["*.md"]));
        assert_eq!(summary.stats, DiffStats::new(10, 3));
    }

    #[test]
    fn test_collect_reads_from_source() {
        let source = FakeDiff::ok("10\t5\tfile1.txt\n20\t15\tfile2.py\n");
        let stats = collect(&source, &excludes(&[]), &Output::default());
        assert_eq!(stats, DiffStats::new(30, 20));
        assert_eq!(source.calls(), 1);
    }

    #[test]
    fn test_collect_fails_open_on_git_error() {
        let source = FakeDiff::failing(|| GitError::NonZeroExit {
            code: Some(1),
            stderr: "fatal: bad revision".to_string(),
        });
        let stats = collect(&source, &excludes(&[]), &Output::default());
        assert_eq!(stats, DiffStats::default());
    }

    #[test]
    fn test_collect_fails_open_on_unexpected_error() {
        let source = FakeDiff::failing(|| {
            GitError::Spawn(std::io::Error::other("Unexpected error"))
        });
        let stats = collect(&source, &excludes(&["*.csv"]), &Output::default());
        assert_eq!(stats, DiffStats::default());
    }

    #[test]
    fn test_collect_with_patterns() -> Result<()> {
        let source = FakeDiff::ok("1\t1\ta.csv\n2\t2\tb.rs\n");
        let stats = collect_with_patterns(&source, &["*.csv".to_string()], &Output::default())?;
        assert_eq!(stats, DiffStats::new(2, 2));
        Ok(())
    }

    #[test]
    fn test_collect_ignores_unmatchable_pattern() -> Result<()> {
        let source = FakeDiff::ok("1\t1\ta.csv\n2\t2\tb.rs\n");
        let patterns = vec!["[z-a]*".to_string(), "*.csv".to_string()];
        let stats = collect_with_patterns(&source, &patterns, &Output::default())?;
        assert_eq!(stats, DiffStats::new(2, 2));
        Ok(())
    }

    #[test]
    fn test_shell_patterns_exclude_like_fnmatch() {
        let text = "1\t1\tx[a.csv\n2\t2\tb.lock\n4\t4\tdata.{csv,tsv}\n8\t8\tdata.tsv\n";
        let summary = parse_numstat(text, &excludes(&["*[a.csv", "[^a].lock", "*.{csv,tsv}"]));
        assert_eq!(summary.excluded, vec!["x[a.csv", "data.{csv,tsv}"]);
        assert_eq!(summary.stats, DiffStats::new(10, 10));
    }
}
