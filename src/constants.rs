//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Editor configuration constants.
pub mod editor {
    /// Default viewport height in lines, until the first draw measures it.
    pub const DEFAULT_VIEWPORT_HEIGHT: usize = 20;

    /// Narrowest soft-wrap width; narrower panes still wrap at this width.
    pub const MIN_WRAP_WIDTH: usize = 10;
}

/// Search constants.
pub mod search {
    /// Maximum number of fuzzy matches offered for a chapter search.
    pub const MAX_SEARCH_RESULTS: usize = 20;
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for async task communication.
    pub const CHANNEL_BUFFER_SIZE: usize = 10;
}

/// UI layout constants.
pub mod ui {
    /// Width of the chapter list pane in characters.
    pub const CHAPTER_LIST_WIDTH: u16 = 26;

    /// Minimum editor pane width in characters.
    pub const MIN_PANE_WIDTH: u16 = 20;
}
