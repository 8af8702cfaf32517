//! Diagnostic output for the hook
//!
//! Everything the hook has to say goes to stderr so that hook runners can
//! show it next to the failing check. Messages carry an `ERROR:` or
//! `WARNING:` prefix, coloured when stderr is a terminal.

use console::style;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        // Errors are always shown, even in quiet mode
        eprintln!("{} {}", style("ERROR:").red().bold().for_stderr(), message);
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("WARNING:").yellow().for_stderr(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("{}", style(message).dim().for_stderr());
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new(false, false)
    }
}
