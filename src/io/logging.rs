//! Structured logging setup for the command-line tool
//!
//! Log lines go to stderr alongside the progress bar. `RUST_LOG` takes
//! precedence over the verbosity flags.

use crate::io::configuration::{
    DEFAULT_LOG_DIRECTIVE, QUIET_LOG_DIRECTIVE, VERBOSE_LOG_DIRECTIVE,
};
use crate::io::error::{Result, computation_error};
use tracing_subscriber::EnvFilter;

/// How much the tool reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Warnings and errors only
    Quiet,
    /// Progress summaries
    #[default]
    Normal,
    /// Per-step diagnostics
    Verbose,
}

impl Verbosity {
    /// Resolve command-line flags, with `quiet` winning over `verbose`
    pub const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Filter directive used when `RUST_LOG` is unset
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Quiet => QUIET_LOG_DIRECTIVE,
            Self::Normal => DEFAULT_LOG_DIRECTIVE,
            Self::Verbose => VERBOSE_LOG_DIRECTIVE,
        }
    }

    /// Filter built from `RUST_LOG`, falling back to this verbosity
    pub fn env_filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.directive()))
    }
}

/// Install the global subscriber writing to stderr
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_logging(verbosity: Verbosity) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(verbosity.env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| computation_error("logging setup", &e))
}
