//! Service layer for business logic.
//!
//! Editing operations are kept apart from the UI so they can be tested
//! without a terminal.

pub mod editor;
