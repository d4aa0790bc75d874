//! `chapterfix` - clean pasted Bible chapter text into verse-per-line form.
//!
//! This crate provides the text transforms, the JSON chapter store and the
//! terminal editor used to fill and repair a New Testament chapter file.

// Re-export public modules for use in integration tests and the binaries
pub mod app;
pub mod bible;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod normalizer;
pub mod services;
pub mod store;
pub mod ui;
