//! Error types for sdkdocs.
//!
//! Library crates use [`DocGenError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all sdkdocs operations.
#[derive(Debug, thiserror::Error)]
pub enum DocGenError {
    /// Configuration file could not be read, parsed or written.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An external command could not be spawned or awaited.
    #[error("command `{program}` failed: {message}")]
    Process { program: String, message: String },

    /// An external command ran past its deadline and was killed.
    #[error("command `{program}` timed out after {secs}s")]
    Timeout { program: String, secs: u64 },

    /// A configured value the pipeline cannot run with.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocGenError>;

impl DocGenError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a process error for `program`.
    pub fn process(program: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Process {
            program: program.into(),
            message: msg.into(),
        }
    }
}
