use std::path::PathBuf;
use std::process::Command;

use super::{DiffSource, GitError};

/// Runs the `git` executable found on `PATH`
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a different executable name or path instead of `git`
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn locate(&self) -> Result<PathBuf, GitError> {
        which::which(&self.program).map_err(GitError::NotFound)
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffSource for GitCli {
    fn staged_numstat(&self) -> Result<String, GitError> {
        let git = self.locate()?;
        tracing::debug!(git = %git.display(), "running git diff --cached --numstat");

        // No timeout: a hung git blocks the hook
        let output = Command::new(&git)
            .args(["diff", "--cached", "--numstat"])
            .output()
            .map_err(GitError::Spawn)?;

        if !output.status.success() {
            return Err(GitError::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(GitError::InvalidOutput)
    }
}
