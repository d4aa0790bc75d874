//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use std::path::PathBuf;

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<PathBuf>,
    },

    /// Chapter store could not be parsed
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Saving the chapter store failed. Not retried.
    #[error("Could not save {}: {source}", path.display())]
    Save {
        /// Store path that was being written.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Create a save error for the given store path
    pub fn save(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Save { path: path.into(), source }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn save_error_names_the_store() {
        let err = Error::save(
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            "/readonly/book/chapters.json",
        );
        let msg = err.to_string();
        assert!(msg.contains("/readonly/book/chapters.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn config_error_carries_hint() {
        let err = Error::config("bad log level `loud`", "Use one of error, warn, info, debug, trace");
        match err {
            Error::Config { hint, .. } => assert!(hint.contains("debug")),
            _ => panic!("Expected Config error"),
        }
    }
}
