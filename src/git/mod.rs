//! Git integration layer
//!
//! The hook only needs one thing from git: the numeric summary of the staged
//! diff. [`DiffSource`] is the seam the collector reads through; [`GitCli`]
//! is the real implementation that shells out to `git`.

use std::string::FromUtf8Error;
use thiserror::Error;

mod operations;

pub use operations::GitCli;

/// Errors from running git
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found: {0}")]
    NotFound(#[source] which::Error),

    #[error("failed to spawn git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("git exited with {}: {stderr}", exit_status(.code))]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("git output is not valid UTF-8: {0}")]
    InvalidOutput(#[source] FromUtf8Error),
}

impl GitError {
    /// Whether git ran and reported failure, as opposed to never producing output
    pub fn is_command_failure(&self) -> bool {
        matches!(self, GitError::NonZeroExit { .. })
    }
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

/// Source of `git diff --cached --numstat` output
pub trait DiffSource {
    /// Return the numstat text for the staged changes
    fn staged_numstat(&self) -> Result<String, GitError>;
}
