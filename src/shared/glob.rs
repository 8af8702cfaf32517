//! Glob pattern utilities
//!
//! Exclude patterns follow shell (`fnmatch`) matching rules rather than
//! globset's own dialect:
//!
//! - `*` and `?` also match `/`, so `*.csv` excludes `data.csv` as well as
//!   `fixtures/big/data.csv`
//! - `[...]` and `[!...]` are classes; a leading `^` is an ordinary character
//! - a `[` without a closing `]` is a literal `[`
//! - `{`, `}` and `\` are ordinary characters
//!
//! Patterns are rewritten into the equivalent globset syntax before they are
//! compiled.

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Compiled set of exclude patterns
#[derive(Debug, Clone)]
pub struct ExcludeSet {
    set: GlobSet,
    unmatchable: Vec<String>,
}

impl ExcludeSet {
    /// Compile `patterns` into a single matcher.
    ///
    /// A pattern that can never match anything (a class with a reversed
    /// range such as `[z-a]`) is left out and listed by
    /// [`ExcludeSet::unmatchable`].
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut unmatchable = Vec::new();

        for pattern in patterns {
            let translated = translate(pattern);
            match shell_glob(&translated).build() {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(err) => {
                    tracing::debug!(%pattern, %translated, error = %err, "pattern can never match");
                    unmatchable.push(pattern.clone());
                }
            }
        }

        let set = builder.build().context("Failed to build exclude pattern set")?;
        Ok(Self { set, unmatchable })
    }

    /// Whether `filename` matches any exclude pattern
    pub fn is_excluded(&self, filename: &str) -> bool {
        self.set.is_match(filename)
    }

    /// Patterns dropped because nothing can match them
    pub fn unmatchable(&self) -> &[String] {
        &self.unmatchable
    }

    /// Number of compiled patterns
    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

fn shell_glob(pattern: &str) -> GlobBuilder<'_> {
    let mut builder = GlobBuilder::new(pattern);
    builder.literal_separator(false).backslash_escape(false);
    builder
}

/// Rewrite a shell pattern into globset syntax with the same meaning
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '[' => {
                // A class ends at the first `]` after an optional `!` and a
                // leading literal `]`
                let mut j = i;
                if chars.get(j) == Some(&'!') {
                    j += 1;
                }
                if chars.get(j) == Some(&']') {
                    j += 1;
                }
                while j < chars.len() && chars[j] != ']' {
                    j += 1;
                }

                if j >= chars.len() {
                    out.push_str("[[]");
                } else {
                    let class: String = chars[i..j].iter().collect();
                    out.push_str(&translate_class(&class));
                    i = j + 1;
                }
            }
            '{' | '}' => {
                out.push('[');
                out.push(c);
                out.push(']');
            }
            _ => out.push(c),
        }
    }

    out
}

/// Translate the contents of a `[...]` class
fn translate_class(class: &str) -> String {
    let Some(rest) = class.strip_prefix('^') else {
        return format!("[{class}]");
    };

    // globset reads a leading `^` as negation, so move it out of first place
    // without letting it land inside a range
    let rest = rest.trim_start_matches('^');
    match rest.strip_suffix('-') {
        _ if rest.is_empty() => "^".to_string(),
        Some("") => "[-^]".to_string(),
        Some(head) => format!("[{head}^-]"),
        None => format!("[{rest}^]"),
    }
}
