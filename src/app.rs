//! Application state and input handling for the chapter editor.

use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use tokio::sync::mpsc;

use crate::bible::{self, ChapterRef};
use crate::config::Config;
use crate::constants::async_tasks::CHANNEL_BUFFER_SIZE;
use crate::constants::editor::DEFAULT_VIEWPORT_HEIGHT;
use crate::constants::search::MAX_SEARCH_RESULTS;
use crate::normalizer::verses::{self, VerseSummary};
use crate::normalizer::{self, Transform};
use crate::services::editor::{Editor, Motion, TextBuffer};
use crate::store::ChapterStore;

/// Messages handled by the update step of the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppUpdate {
    /// The chapter list selection moved to this index.
    ChapterSelected(usize),
}

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Chapter list on the left.
    ChapterList,
    /// Text editor on the right.
    Editor,
}

/// An action waiting on a y/n answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Discard unsaved edits and open the chapter at this index.
    SwitchChapter(usize),
    /// Discard unsaved edits and quit.
    Quit,
}

/// Chapter editor state.
pub struct App {
    /// Focused pane.
    pub mode: AppMode,
    /// Every chapter shown in the list, canonical order.
    pub chapters: Vec<ChapterRef>,
    /// Selection in the chapter list.
    pub chapter_list_state: ListState,
    /// Index of the chapter loaded into the editor.
    pub current: Option<usize>,
    /// Backing chapter store.
    pub store: ChapterStore,
    /// Loaded configuration.
    pub config: Config,
    /// Text being edited.
    pub buffer: TextBuffer,
    /// First visible row of the editor, in wrapped rows.
    pub scroll_offset: usize,
    /// Editor height in rows, measured on draw.
    pub viewport_height: usize,
    /// Text typed after `:`.
    pub command_buffer: String,
    /// Whether the `:` prompt is open.
    pub is_command_mode: bool,
    /// Whether the `/` chapter search prompt is open.
    pub search_active: bool,
    /// Text typed after `/`.
    pub search_query: String,
    /// Chapter indices matching the search, best first.
    pub search_results: Vec<usize>,
    /// Highlighted entry in `search_results`.
    pub search_selection: usize,
    /// Action awaiting confirmation.
    pub pending: Option<PendingAction>,
    /// Blocking error modal.
    pub error_message: Option<String>,
    /// Blocking info modal.
    pub status_message: Option<String>,
    /// Whether the help modal is open.
    pub show_help: bool,
    should_quit: bool,
    async_task_tx: mpsc::Sender<AppUpdate>,
    async_task_rx: mpsc::Receiver<AppUpdate>,
}

impl App {
    /// Create the app and queue loading of the first chapter.
    pub fn new(config: Config, store: ChapterStore) -> Self {
        let (async_task_tx, async_task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let mut app = Self {
            mode: AppMode::ChapterList,
            chapters: bible::chapter_list(),
            chapter_list_state: ListState::default(),
            current: None,
            store,
            config,
            buffer: TextBuffer::new(),
            scroll_offset: 0,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            command_buffer: String::new(),
            is_command_mode: false,
            search_active: false,
            search_query: String::new(),
            search_results: Vec::new(),
            search_selection: 0,
            pending: None,
            error_message: None,
            status_message: None,
            show_help: false,
            should_quit: false,
            async_task_tx,
            async_task_rx,
        };

        if !app.chapters.is_empty() {
            app.select_chapter(0);
        }
        app
    }

    /// Whether the event loop should exit.
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Stop the event loop.
    pub fn quit(&mut self) {
        tracing::info!("Quitting");
        self.should_quit = true;
    }

    /// Chapter loaded into the editor.
    pub fn current_chapter(&self) -> Option<&ChapterRef> {
        self.current.and_then(|idx| self.chapters.get(idx))
    }

    /// Verse numbering overview of the editor text.
    pub fn verse_summary(&self) -> VerseSummary {
        verses::summarize(&self.buffer.text())
    }

    fn current_display(&self) -> String {
        self.current_chapter()
            .map_or_else(|| "the editor text".to_string(), ChapterRef::display)
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Modals block everything else
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        if self.error_message.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.error_message = None;
            }
            return;
        }

        if let Some(action) = self.pending {
            match key.code {
                KeyCode::Char('y' | 'Y') => {
                    self.pending = None;
                    self.status_message = None;
                    self.confirm(action);
                }
                KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                    self.pending = None;
                    self.status_message = None;
                    self.cancel(action);
                }
                _ => {}
            }
            return;
        }

        if self.status_message.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.status_message = None;
            }
            return;
        }

        if self.is_command_mode {
            self.handle_command_input(key);
            return;
        }

        if self.search_active {
            self.handle_search_input(key);
            return;
        }

        if key.code == KeyCode::F(1) {
            self.show_help = true;
            return;
        }

        if self.handle_shortcut(key) {
            return;
        }

        match self.mode {
            AppMode::ChapterList => self.handle_chapter_list_input(key),
            AppMode::Editor => self.handle_editor_input(key),
        }
    }

    /// Handle text pasted into the terminal.
    pub fn handle_paste(&mut self, text: &str) {
        if self.show_help
            || self.error_message.is_some()
            || self.status_message.is_some()
            || self.pending.is_some()
        {
            return;
        }

        // Prompts are single line
        let single_line = || text.lines().next().unwrap_or("").to_string();
        if self.is_command_mode {
            self.command_buffer.push_str(&single_line());
        } else if self.search_active {
            self.search_query.push_str(&single_line());
            self.update_search();
        } else {
            self.mode = AppMode::Editor;
            self.buffer.insert_str(text);
        }
    }

    // Ctrl chords that work from either pane
    fn handle_shortcut(&mut self, key: KeyEvent) -> bool {
        if !key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match key.code {
            KeyCode::Char('s') => {
                self.save_current();
            }
            KeyCode::Char('l') => self.apply_transform(&Transform::FixLineBreaks),
            KeyCode::Char('n') => self.apply_transform(&Transform::NormalizeVerses),
            KeyCode::Char('r') => {
                self.is_command_mode = true;
                self.command_buffer = format!("strip {}", self.config.strip_chars);
            }
            KeyCode::Char('q') => self.request_quit(false),
            _ => return false,
        }
        true
    }

    fn handle_chapter_list_input(&mut self, key: KeyEvent) {
        let selected = self.chapter_list_state.selected().unwrap_or(0);
        let last = self.chapters.len().saturating_sub(1);
        let page = self.viewport_height.max(1);

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_chapter(selected.saturating_sub(1)),
            KeyCode::Down | KeyCode::Char('j') => self.select_chapter((selected + 1).min(last)),
            KeyCode::PageUp => self.select_chapter(selected.saturating_sub(page)),
            KeyCode::PageDown => self.select_chapter((selected + page).min(last)),
            KeyCode::Home | KeyCode::Char('g') => self.select_chapter(0),
            KeyCode::End | KeyCode::Char('G') => self.select_chapter(last),
            KeyCode::Enter | KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.mode = AppMode::Editor;
            }
            KeyCode::Char('/') => {
                self.search_active = true;
                self.search_query.clear();
                self.update_search();
            }
            KeyCode::Char(':') => {
                self.is_command_mode = true;
                self.command_buffer.clear();
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('q') => self.request_quit(false),
            _ => {}
        }
    }

    fn handle_editor_input(&mut self, key: KeyEvent) {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let ctrl = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::META);

        match key.code {
            KeyCode::Esc => {
                if self.buffer.selection().is_some() {
                    self.buffer.clear_selection();
                } else {
                    self.mode = AppMode::ChapterList;
                }
            }
            KeyCode::Tab | KeyCode::BackTab => self.mode = AppMode::ChapterList,
            KeyCode::Char('a') if ctrl => self.buffer.select_all(),
            KeyCode::Char('c') if ctrl => self.copy_selection(),
            KeyCode::Char('x') if ctrl => self.cut_selection(),
            KeyCode::Char('v') if ctrl => self.paste_from_clipboard(),
            KeyCode::Char(c) if !ctrl => self.buffer.insert_char(c),
            KeyCode::Enter => self.buffer.newline(),
            KeyCode::Backspace => self.buffer.delete_backward(),
            KeyCode::Delete => self.buffer.delete_forward(),
            KeyCode::Left => self.buffer.move_cursor(Motion::Left, shift),
            KeyCode::Right => self.buffer.move_cursor(Motion::Right, shift),
            KeyCode::Up => self.buffer.move_cursor(Motion::Up, shift),
            KeyCode::Down => self.buffer.move_cursor(Motion::Down, shift),
            KeyCode::Home if ctrl => self.buffer.move_cursor(Motion::DocStart, shift),
            KeyCode::End if ctrl => self.buffer.move_cursor(Motion::DocEnd, shift),
            KeyCode::Home => self.buffer.move_cursor(Motion::LineStart, shift),
            KeyCode::End => self.buffer.move_cursor(Motion::LineEnd, shift),
            KeyCode::PageUp => {
                self.buffer.move_cursor(Motion::PageUp(self.viewport_height), shift);
            }
            KeyCode::PageDown => {
                self.buffer.move_cursor(Motion::PageDown(self.viewport_height), shift);
            }
            _ => {}
        }
    }

    fn handle_command_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.is_command_mode = false;
                self.command_buffer.clear();
            }
            KeyCode::Enter => {
                let command = std::mem::take(&mut self.command_buffer);
                self.is_command_mode = false;
                self.execute_command(&command);
            }
            KeyCode::Backspace => {
                self.command_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.command_buffer.push(c);
            }
            _ => {}
        }
    }

    /// Run a `:` command, given without the colon.
    pub fn execute_command(&mut self, command: &str) {
        // Only leading whitespace is dropped; the strip set may hold spaces
        let command = command.trim_start();
        let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
        let name = name.trim_end();

        match name {
            "" => {}
            "w" | "save" => {
                self.save_current();
            }
            "wq" | "x" => {
                if self.save_current() {
                    self.quit();
                }
            }
            "q" | "quit" => self.request_quit(false),
            "q!" => self.request_quit(true),
            "fix" => self.apply_transform(&Transform::FixLineBreaks),
            "norm" | "normalize" => self.apply_transform(&Transform::NormalizeVerses),
            "prep" | "prepare" => self.prepare_buffer(),
            "strip" => {
                let chars = if arg.is_empty() {
                    self.config.strip_chars.clone()
                } else {
                    arg.to_string()
                };
                if chars.is_empty() {
                    self.error_message =
                        Some("No symbols to remove. Use :strip <chars>.".to_string());
                } else {
                    self.apply_transform(&Transform::StripChars(chars));
                }
            }
            "h" | "help" => self.show_help = true,
            "go" | "open" => self.jump_to(arg.trim()),
            _ => self.jump_to(command.trim_end()),
        }
    }

    fn jump_to(&mut self, query: &str) {
        match self.find_chapters(query).first() {
            Some(&idx) => self.select_chapter(idx),
            None => {
                self.error_message = Some(format!("Unknown command or chapter: {query}"));
            }
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search_active = false;
                self.search_query.clear();
                self.search_results.clear();
            }
            KeyCode::Enter => {
                self.search_active = false;
                if let Some(&idx) = self.search_results.get(self.search_selection) {
                    self.select_chapter(idx);
                } else if !self.search_query.trim().is_empty() {
                    self.status_message =
                        Some(format!("No chapter matches \"{}\".", self.search_query.trim()));
                }
                self.search_query.clear();
                self.search_results.clear();
            }
            KeyCode::Up => {
                self.search_selection = self.search_selection.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.search_selection + 1 < self.search_results.len() {
                    self.search_selection += 1;
                }
            }
            KeyCode::Backspace => {
                self.search_query.pop();
                self.update_search();
            }
            KeyCode::Char(c) => {
                self.search_query.push(c);
                self.update_search();
            }
            _ => {}
        }
    }

    fn update_search(&mut self) {
        self.search_results = self.find_chapters(&self.search_query);
        self.search_selection = 0;
    }

    /// Chapters matching a typed query: an exact reference first, then
    /// fuzzy matches.
    fn find_chapters(&self, query: &str) -> Vec<usize> {
        let exact = bible::parse_chapter_query(query)
            .and_then(|r| self.chapters.iter().position(|c| *c == r));

        let mut results: Vec<usize> = exact.into_iter().collect();
        results.extend(
            bible::search_chapters(query, &self.chapters)
                .into_iter()
                .filter(|idx| Some(*idx) != exact),
        );
        results.truncate(MAX_SEARCH_RESULTS);
        results
    }

    /// Move the list selection and announce it to the update step.
    pub fn select_chapter(&mut self, idx: usize) {
        if self.chapter_list_state.selected() == Some(idx) && self.current == Some(idx) {
            return;
        }
        self.chapter_list_state.select(Some(idx));
        self.send_update(AppUpdate::ChapterSelected(idx));
    }

    fn send_update(&self, update: AppUpdate) {
        if let Err(e) = self.async_task_tx.try_send(update) {
            tracing::warn!("Dropped app update: {e}");
        }
    }

    /// Apply queued updates. Call once per event loop iteration.
    pub fn handle_updates(&mut self) {
        loop {
            match self.async_task_rx.try_recv() {
                Ok(AppUpdate::ChapterSelected(idx)) => self.on_chapter_selected(idx),
                Err(mpsc::error::TryRecvError::Empty | mpsc::error::TryRecvError::Disconnected) => {
                    break;
                }
            }
        }
    }

    fn on_chapter_selected(&mut self, idx: usize) {
        if self.current == Some(idx) {
            return;
        }
        let Some(target) = self.chapters.get(idx).map(ChapterRef::display) else {
            return;
        };

        if self.buffer.is_modified() {
            self.pending = Some(PendingAction::SwitchChapter(idx));
            self.status_message = Some(format!(
                "{} has unsaved changes. Discard them and open {target}? (y/n)",
                self.current_display()
            ));
            return;
        }
        self.load_chapter(idx);
    }

    fn load_chapter(&mut self, idx: usize) {
        let Some(chapter) = self.chapters.get(idx) else {
            return;
        };
        let text = self.store.chapter_text(chapter);
        tracing::info!("Opened {chapter} ({} bytes)", text.len());

        self.buffer.load(text);
        self.current = Some(idx);
        self.chapter_list_state.select(Some(idx));
        self.scroll_offset = 0;
    }

    fn confirm(&mut self, action: PendingAction) {
        match action {
            PendingAction::SwitchChapter(idx) => {
                tracing::info!("Discarding unsaved changes to {}", self.current_display());
                self.load_chapter(idx);
            }
            PendingAction::Quit => self.quit(),
        }
    }

    fn cancel(&mut self, action: PendingAction) {
        if let PendingAction::SwitchChapter(_) = action {
            self.chapter_list_state.select(self.current);
        }
    }

    fn request_quit(&mut self, force: bool) {
        if force || !self.buffer.is_modified() {
            self.quit();
            return;
        }
        self.pending = Some(PendingAction::Quit);
        self.status_message = Some(format!(
            "{} has unsaved changes. Quit without saving? (y/n)",
            self.current_display()
        ));
    }

    /// Write the editor text to the store under the current chapter.
    ///
    /// Shows the outcome in a modal and returns whether the save succeeded.
    pub fn save_current(&mut self) -> bool {
        let Some(chapter) = self.current_chapter().cloned() else {
            self.error_message = Some("No chapter selected.".to_string());
            return false;
        };

        self.store.set_chapter(&chapter, self.buffer.text());
        match self.store.save() {
            Ok(()) => {
                self.buffer.mark_saved();
                self.status_message = Some(format!(
                    "Saved {} to {}",
                    chapter.display(),
                    self.store.path().display()
                ));
                true
            }
            Err(e) => {
                tracing::error!("Saving {chapter} failed: {e}");
                self.error_message = Some(e.to_string());
                false
            }
        }
    }

    /// Replace the editor text with the transform's output.
    pub fn apply_transform(&mut self, transform: &Transform) {
        let text = transform.apply(&self.buffer.text());
        self.buffer.replace_text(&text);
        tracing::info!("Applied {} to {}", transform.name(), self.current_display());
        self.status_message = Some(transform.done_message());
    }

    fn prepare_buffer(&mut self) {
        let text = normalizer::prepare(&self.buffer.text());
        self.buffer.replace_text(&text);
        tracing::info!("Prepared {}", self.current_display());
        self.status_message = Some(
            "Line breaks fixed and verses normalized. Use Save to persist.".to_string(),
        );
    }

    fn copy_selection(&self) {
        let text = self
            .buffer
            .selected_text()
            .unwrap_or_else(|| format!("{}\n", self.buffer.current_line()));
        clipboard_write(&text);
    }

    fn cut_selection(&mut self) {
        if let Some(text) = self.buffer.selected_text() {
            clipboard_write(&text);
            self.buffer.delete_selection();
        } else {
            let line = self.buffer.take_line();
            clipboard_write(&(line + "\n"));
        }
    }

    fn paste_from_clipboard(&mut self) {
        if let Some(text) = clipboard_read() {
            self.buffer.insert_str(&text);
        }
    }
}

/// Write text to system clipboard (silently ignores errors)
fn clipboard_write(text: &str) {
    if let Err(e) = Clipboard::new().and_then(|mut cb| cb.set_text(text.to_owned())) {
        tracing::warn!("Clipboard write failed: {e}");
    }
}

/// Read text from system clipboard
fn clipboard_read() -> Option<String> {
    Clipboard::new().ok()?.get_text().ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with(entries: &[(&str, &str)]) -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut store = ChapterStore::empty(dir.path().join("chapters.json"));
        for (k, v) in entries {
            store.set(*k, *v);
        }
        let mut app = App::new(Config::default(), store);
        app.handle_updates();
        (app, dir)
    }

    #[test]
    fn test_first_chapter_loaded_on_start() {
        let (app, _dir) = app_with(&[("Matthew_1", "1 The book of the genealogy")]);
        assert_eq!(app.current, Some(0));
        assert_eq!(app.buffer.text(), "1 The book of the genealogy");
        assert!(!app.buffer.is_modified());
    }

    #[test]
    fn test_selection_change_loads_chapter_via_update() {
        let (mut app, _dir) = app_with(&[("Matthew_2", "1 Now after Jesus was born")]);
        app.handle_key(key(KeyCode::Down));
        // Nothing changes until the update is handled
        assert_eq!(app.current, Some(0));
        app.handle_updates();
        assert_eq!(app.current, Some(1));
        assert_eq!(app.buffer.text(), "1 Now after Jesus was born");
    }

    #[test]
    fn test_missing_chapter_loads_empty() {
        let (mut app, _dir) = app_with(&[]);
        app.handle_key(key(KeyCode::End));
        app.handle_updates();
        assert_eq!(app.current_chapter().unwrap().display(), "Revelation 22");
        assert_eq!(app.buffer.text(), "");
    }

    #[test]
    fn test_unsaved_changes_need_confirmation() {
        let (mut app, _dir) = app_with(&[]);
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Down));
        app.handle_updates();

        assert_eq!(app.pending, Some(PendingAction::SwitchChapter(1)));
        assert_eq!(app.current, Some(0));

        // Declining keeps the edit and restores the list selection
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.pending, None);
        assert_eq!(app.chapter_list_state.selected(), Some(0));
        assert_eq!(app.buffer.text(), "x");

        app.handle_key(key(KeyCode::Down));
        app.handle_updates();
        app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(app.current, Some(1));
        assert_eq!(app.buffer.text(), "");
    }

    #[test]
    fn test_fix_line_breaks_shortcut() {
        let (mut app, _dir) = app_with(&[("Matthew_1", "For God so\nloved the world")]);
        app.handle_key(ctrl('l'));
        assert_eq!(app.buffer.text(), "For God so loved the world");
        assert_eq!(
            app.status_message.as_deref(),
            Some("Line breaks fixed. Use Save to persist.")
        );
        assert!(app.buffer.is_modified());
    }

    #[test]
    fn test_strip_command() {
        let (mut app, _dir) = app_with(&[("Matthew_1", "Hello—world")]);
        app.execute_command("strip —");
        assert_eq!(app.buffer.text(), "Helloworld");

        app.status_message = None;
        app.execute_command("strip");
        assert!(app.error_message.is_some());
    }

    #[test]
    fn test_strip_command_removes_unicode_spaces() {
        let (mut app, _dir) = app_with(&[("Matthew_1", "Grace\u{a0}to\u{2009}you")]);
        app.execute_command("strip \u{a0}\u{2009}");
        assert_eq!(app.buffer.text(), "Gracetoyou");
        assert!(app.error_message.is_none());
    }

    #[test]
    fn test_strip_command_trailing_space_falls_back_to_config() {
        let (mut app, _dir) = app_with(&[("Matthew_1", "Grace† to you")]);
        app.config.strip_chars = "†".to_string();
        app.execute_command("strip ");
        assert_eq!(app.buffer.text(), "Grace to you");
    }

    #[test]
    fn test_ctrl_r_prefills_strip_prompt() {
        let (mut app, _dir) = app_with(&[]);
        app.config.strip_chars = "†*".to_string();
        app.handle_key(ctrl('r'));
        assert!(app.is_command_mode);
        assert_eq!(app.command_buffer, "strip †*");
    }

    #[test]
    fn test_save_writes_store() {
        let (mut app, dir) = app_with(&[("Mark_1", "kept")]);
        app.handle_paste("1In the beginning.2The Word");
        app.execute_command("norm");
        assert!(app.save_current());
        assert!(!app.buffer.is_modified());

        let path = dir.path().join("chapters.json");
        assert_eq!(
            app.status_message.as_deref(),
            Some(format!("Saved Matthew 1 to {}", path.display()).as_str())
        );
        let reopened = ChapterStore::open(&path).unwrap();
        assert_eq!(reopened.get("Matthew_1"), "1 In the beginning.\n2 The Word");
        assert_eq!(reopened.get("Mark_1"), "kept");
    }

    #[test]
    fn test_save_failure_shows_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();
        let store = ChapterStore::empty(blocker.join("chapters.json"));
        let mut app = App::new(Config::default(), store);
        app.handle_updates();

        app.handle_paste("text");
        assert!(!app.save_current());
        assert!(app
            .error_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Could not save")));
        assert!(app.buffer.is_modified());
    }

    #[test]
    fn test_search_jumps_to_chapter() {
        let (mut app, _dir) = app_with(&[]);
        app.handle_key(key(KeyCode::Char('/')));
        for c in "1 cor 13".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        app.handle_updates();
        assert_eq!(app.current_chapter().unwrap().display(), "1 Corinthians 13");
    }

    #[test]
    fn test_quit_with_unsaved_changes_asks_first() {
        let (mut app, _dir) = app_with(&[]);
        app.handle_paste("draft");
        app.execute_command("q");
        assert!(!app.should_quit());
        assert_eq!(app.pending, Some(PendingAction::Quit));
        app.handle_key(key(KeyCode::Char('y')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_typing_colon_in_editor_inserts_text() {
        let (mut app, _dir) = app_with(&[]);
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char(':')));
        assert!(!app.is_command_mode);
        assert_eq!(app.buffer.text(), ":");
    }
}
