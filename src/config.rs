//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use tracing::Level;

use crate::error::{Error, Result};

/// File name of the chapter store inside the data directory.
const STORE_FILE: &str = "nkjv-chapters.json";

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Path to the JSON chapter store
    pub store_path: PathBuf,
    /// Characters pre-filled into the strip-symbols prompt
    pub strip_chars: String,
    /// Log file path; logging is disabled when unset
    pub log_path: Option<PathBuf>,
    /// Maximum log level written to the log file
    pub log_level: Level,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            store_path: default_store_path(),
            strip_chars: String::new(),
            log_path: None,
            log_level: Level::INFO,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(path) = env::var("CHAPTER_STORE") {
            config.store_path = expand_path(&path);
        }

        if let Ok(chars) = env::var("CHAPTERFIX_STRIP") {
            config.strip_chars = chars;
        }

        config.log_path = env::var("CHAPTERFIX_LOG")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(|p| expand_path(&p));

        if let Ok(level) = env::var("CHAPTERFIX_LOG_LEVEL") {
            config.log_level = parse_level(&level)?;
        }

        Ok(config)
    }
}

/// Parse a log level name (case-insensitive).
pub fn parse_level(name: &str) -> Result<Level> {
    name.trim().parse::<Level>().map_err(|_| {
        Error::config(
            format!("unknown log level `{name}`"),
            "Set CHAPTERFIX_LOG_LEVEL to one of error, warn, info, debug, trace",
        )
    })
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

/// Default store location: the platform data directory, or `book/` under the
/// working directory when no data directory is known.
fn default_store_path() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from("book").join(STORE_FILE),
        |d| d.join("chapterfix").join(STORE_FILE),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_level(" WARN ").unwrap(), Level::WARN);
        assert!(matches!(parse_level("loud"), Err(Error::Config { .. })));
    }

    #[test]
    fn test_default_store_file_name() {
        let config = Config::default();
        assert!(config.store_path.ends_with(STORE_FILE));
        assert!(config.log_path.is_none());
        assert_eq!(config.app_name(), "chapterfix");
    }
}
