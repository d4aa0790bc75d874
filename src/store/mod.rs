//! JSON chapter store.
//!
//! A flat JSON object mapping `Book_Chapter` keys to chapter text. Keys keep
//! their file order, and entries this tool does not touch are written back
//! exactly as they were read.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::bible::ChapterRef;
use crate::error::{Error, Result};

/// Chapter text keyed by `Book_Chapter`, backed by a JSON file.
#[derive(Debug, Clone)]
pub struct ChapterStore {
    path: PathBuf,
    data: Map<String, Value>,
}

impl ChapterStore {
    /// Create an empty store that will be saved to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: Map::new(),
        }
    }

    /// Load the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::info!("No chapter store at {}, starting empty", path.display());
            return Ok(Self::empty(path));
        }

        let raw = fs_err::read_to_string(&path).map_err(|e| Error::io(e, path.clone()))?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| Error::parse(format!("invalid JSON: {e}"), path.clone()))?;
        let Value::Object(data) = value else {
            return Err(Error::parse("expected a JSON object of chapters", path));
        };

        tracing::info!("Loaded {} chapters from {}", data.len(), path.display());
        Ok(Self { path, data })
    }

    /// Path the store is saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Text stored under `key`, or an empty string.
    pub fn get(&self, key: &str) -> &str {
        self.data.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// Text stored for a chapter, or an empty string.
    pub fn chapter_text(&self, chapter: &ChapterRef) -> &str {
        self.get(&chapter.key())
    }

    /// Insert or overwrite the text under `key`.
    pub fn set(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.data.insert(key.into(), Value::String(text.into()));
    }

    /// Insert or overwrite the text for a chapter.
    pub fn set_chapter(&mut self, chapter: &ChapterRef, text: impl Into<String>) {
        self.set(chapter.key(), text);
    }

    /// Whether `key` holds non-blank text.
    pub fn is_filled(&self, key: &str) -> bool {
        !self.get(key).trim().is_empty()
    }

    /// Number of keys holding non-blank text.
    pub fn filled_count(&self) -> usize {
        self.data.keys().filter(|k| self.is_filled(k)).count()
    }

    /// All keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write the store to disk, creating the parent directory if needed.
    ///
    /// Failures are returned as [`Error::Save`] and are not retried.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(|e| Error::save(e, &self.path))?;
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| Error::Msg(format!("Failed to serialize chapters: {e}")))?;

        // Write beside the store and rename so a crash never leaves it half written
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        if let Err(e) = fs_err::write(&tmp_path, json) {
            let _ = fs_err::remove_file(&tmp_path);
            return Err(Error::save(e, &self.path));
        }
        fs_err::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs_err::remove_file(&tmp_path);
            Error::save(e, &self.path)
        })?;

        tracing::info!("Saved {} chapters to {}", self.data.len(), self.path.display());
        Ok(())
    }
}
