//! Editor service trait and text manipulation utilities.
//!
//! This module provides abstractions for text editing operations, allowing
//! the editor logic to be tested independently of the UI.
//!
//! Cursor columns count characters, not bytes, so pasted text with dashes,
//! daggers or curly quotes edits safely.

/// Trait for text editing operations.
///
/// This trait abstracts the core editing functionality, allowing for
/// different implementations (e.g., single-line, multi-line, with undo).
pub trait Editor {
    /// Get the current content as lines.
    fn content(&self) -> &[String];

    /// Get the current cursor position (line, column).
    fn cursor_position(&self) -> (usize, usize);

    /// Set the cursor position.
    fn set_cursor(&mut self, line: usize, column: usize);

    /// Insert a character at the current cursor position.
    fn insert_char(&mut self, c: char);

    /// Insert a string at the current cursor position.
    fn insert_str(&mut self, s: &str);

    /// Delete the character before the cursor (backspace).
    fn delete_backward(&mut self);

    /// Delete the character at the cursor (delete).
    fn delete_forward(&mut self);

    /// Check if there is any non-whitespace content.
    fn has_content(&self) -> bool {
        self.content().iter().any(|line| !line.trim().is_empty())
    }

    /// Get the total number of lines.
    fn line_count(&self) -> usize {
        self.content().len()
    }
}

/// Selection range in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Start line (0-indexed).
    pub start_line: usize,
    /// Start column (0-indexed).
    pub start_col: usize,
    /// End line (0-indexed).
    pub end_line: usize,
    /// End column (0-indexed).
    pub end_col: usize,
}

impl Selection {
    /// Create a new selection.
    #[must_use]
    pub const fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Normalize the selection so start comes before end.
    #[must_use]
    pub const fn normalized(&self) -> Self {
        if self.start_line > self.end_line
            || (self.start_line == self.end_line && self.start_col > self.end_col)
        {
            Self {
                start_line: self.end_line,
                start_col: self.end_col,
                end_line: self.start_line,
                end_col: self.start_col,
            }
        } else {
            *self
        }
    }

    /// Check if the selection is empty (zero length).
    pub const fn is_empty(&self) -> bool {
        self.start_line == self.end_line && self.start_col == self.end_col
    }

    /// Whether the character at (line, col) falls inside the selection.
    pub const fn contains(&self, line: usize, col: usize) -> bool {
        let s = self.normalized();
        if line < s.start_line || line > s.end_line {
            return false;
        }
        let after_start = line > s.start_line || col >= s.start_col;
        let before_end = line < s.end_line || col < s.end_col;
        after_start && before_end
    }
}

/// Cursor motions understood by [`TextBuffer::move_cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// One character left, wrapping to the previous line.
    Left,
    /// One character right, wrapping to the next line.
    Right,
    /// One line up.
    Up,
    /// One line down.
    Down,
    /// Start of the current line.
    LineStart,
    /// End of the current line.
    LineEnd,
    /// Several lines up.
    PageUp(usize),
    /// Several lines down.
    PageDown(usize),
    /// Start of the document.
    DocStart,
    /// End of the document.
    DocEnd,
}

/// Multi-line text buffer holding one chapter's text.
///
/// Always holds at least one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor_line: usize,
    cursor_col: usize,
    anchor: Option<(usize, usize)>,
    modified: bool,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_line: 0,
            cursor_col: 0,
            anchor: None,
            modified: false,
        }
    }

    /// Create a buffer holding `text`, cursor at the start.
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.load(text);
        buffer
    }

    /// Replace the content with freshly loaded text. Clears the modified flag.
    pub fn load(&mut self, text: &str) {
        self.lines = split_lines(text);
        self.cursor_line = 0;
        self.cursor_col = 0;
        self.anchor = None;
        self.modified = false;
    }

    /// Replace the content with the result of a transform.
    ///
    /// The cursor stays on the same line where possible. Marks the buffer
    /// modified only if the text actually changed.
    pub fn replace_text(&mut self, text: &str) {
        let lines = split_lines(text);
        if lines == self.lines {
            return;
        }
        self.lines = lines;
        self.anchor = None;
        self.modified = true;
        self.clamp_cursor();
    }

    /// Full text, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Whether the buffer changed since it was loaded or saved.
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Record that the current content has been persisted.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Number of characters on a line (0 past the end).
    pub fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| l.chars().count())
    }

    /// Current selection, if any and non-empty, normalized.
    pub fn selection(&self) -> Option<Selection> {
        let (line, col) = self.anchor?;
        let sel = Selection::new(line, col, self.cursor_line, self.cursor_col).normalized();
        (!sel.is_empty()).then_some(sel)
    }

    /// Drop the selection without moving the cursor.
    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Select the whole document.
    pub fn select_all(&mut self) {
        self.anchor = Some((0, 0));
        self.cursor_line = self.lines.len() - 1;
        self.cursor_col = self.line_len(self.cursor_line);
    }

    /// Move the cursor, extending the selection when `extend` is set.
    pub fn move_cursor(&mut self, motion: Motion, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some((self.cursor_line, self.cursor_col));
            }
        } else {
            self.anchor = None;
        }

        let last = self.lines.len() - 1;
        match motion {
            Motion::Left => {
                if self.cursor_col > 0 {
                    self.cursor_col -= 1;
                } else if self.cursor_line > 0 {
                    self.cursor_line -= 1;
                    self.cursor_col = self.line_len(self.cursor_line);
                }
            }
            Motion::Right => {
                if self.cursor_col < self.line_len(self.cursor_line) {
                    self.cursor_col += 1;
                } else if self.cursor_line < last {
                    self.cursor_line += 1;
                    self.cursor_col = 0;
                }
            }
            Motion::Up => self.move_vertical(-1),
            Motion::Down => self.move_vertical(1),
            Motion::PageUp(n) => self.move_vertical(-isize::try_from(n).unwrap_or(isize::MAX)),
            Motion::PageDown(n) => self.move_vertical(isize::try_from(n).unwrap_or(isize::MAX)),
            Motion::LineStart => self.cursor_col = 0,
            Motion::LineEnd => self.cursor_col = self.line_len(self.cursor_line),
            Motion::DocStart => {
                self.cursor_line = 0;
                self.cursor_col = 0;
            }
            Motion::DocEnd => {
                self.cursor_line = last;
                self.cursor_col = self.line_len(last);
            }
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let last = self.lines.len() - 1;
        let target = self.cursor_line.saturating_add_signed(delta).min(last);
        self.cursor_line = target;
        self.cursor_col = self.cursor_col.min(self.line_len(target));
    }

    /// Split the current line at the cursor.
    pub fn newline(&mut self) {
        self.delete_selection();
        let at = byte_index(&self.lines[self.cursor_line], self.cursor_col);
        let rest = self.lines[self.cursor_line].split_off(at);
        self.cursor_line += 1;
        self.cursor_col = 0;
        self.lines.insert(self.cursor_line, rest);
        self.modified = true;
    }

    /// Selected text, if there is a selection.
    pub fn selected_text(&self) -> Option<String> {
        let sel = self.selection()?;
        let mut out = String::new();
        for line in sel.start_line..=sel.end_line {
            let text = &self.lines[line];
            let from = if line == sel.start_line { sel.start_col } else { 0 };
            let to = if line == sel.end_line { sel.end_col } else { self.line_len(line) };
            out.push_str(&text[byte_index(text, from)..byte_index(text, to)]);
            if line != sel.end_line {
                out.push('\n');
            }
        }
        Some(out)
    }

    /// Delete the selected text. Returns whether anything was removed.
    pub fn delete_selection(&mut self) -> bool {
        let Some(sel) = self.selection() else {
            self.anchor = None;
            return false;
        };

        let tail = {
            let end = &self.lines[sel.end_line];
            end[byte_index(end, sel.end_col)..].to_string()
        };
        let start = &mut self.lines[sel.start_line];
        let cut = byte_index(start, sel.start_col);
        start.truncate(cut);
        start.push_str(&tail);
        self.lines.drain(sel.start_line + 1..=sel.end_line);

        self.cursor_line = sel.start_line;
        self.cursor_col = sel.start_col;
        self.anchor = None;
        self.modified = true;
        true
    }

    /// Text of the cursor line.
    pub fn current_line(&self) -> &str {
        &self.lines[self.cursor_line]
    }

    /// Remove the cursor line entirely and return it.
    pub fn take_line(&mut self) -> String {
        self.anchor = None;
        self.modified = true;
        if self.lines.len() == 1 {
            self.cursor_col = 0;
            return std::mem::take(&mut self.lines[0]);
        }
        let line = self.lines.remove(self.cursor_line);
        self.clamp_cursor();
        line
    }

    fn clamp_cursor(&mut self) {
        self.cursor_line = self.cursor_line.min(self.lines.len() - 1);
        self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_line));
    }
}

impl Editor for TextBuffer {
    fn content(&self) -> &[String] {
        &self.lines
    }

    fn cursor_position(&self) -> (usize, usize) {
        (self.cursor_line, self.cursor_col)
    }

    fn set_cursor(&mut self, line: usize, column: usize) {
        self.anchor = None;
        self.cursor_line = line;
        self.cursor_col = column;
        self.clamp_cursor();
    }

    fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.newline();
            return;
        }
        self.delete_selection();
        let line = &mut self.lines[self.cursor_line];
        let at = byte_index(line, self.cursor_col);
        line.insert(at, c);
        self.cursor_col += 1;
        self.modified = true;
    }

    fn insert_str(&mut self, s: &str) {
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        if normalized.is_empty() {
            return;
        }
        self.delete_selection();

        let line = &mut self.lines[self.cursor_line];
        let at = byte_index(line, self.cursor_col);
        let tail = line.split_off(at);

        let mut pieces = normalized.split('\n');
        if let Some(first) = pieces.next() {
            line.push_str(first);
        }
        for piece in pieces {
            self.cursor_line += 1;
            self.lines.insert(self.cursor_line, piece.to_string());
        }

        let line = &mut self.lines[self.cursor_line];
        self.cursor_col = line.chars().count();
        line.push_str(&tail);
        self.modified = true;
    }

    fn delete_backward(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_line];
            let at = byte_index(line, self.cursor_col - 1);
            line.remove(at);
            self.cursor_col -= 1;
            self.modified = true;
        } else if self.cursor_line > 0 {
            let current = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = self.line_len(self.cursor_line);
            self.lines[self.cursor_line].push_str(&current);
            self.modified = true;
        }
    }

    fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.cursor_col < self.line_len(self.cursor_line) {
            let line = &mut self.lines[self.cursor_line];
            let at = byte_index(line, self.cursor_col);
            line.remove(at);
            self.modified = true;
        } else if self.cursor_line + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_line + 1);
            self.lines[self.cursor_line].push_str(&next);
            self.modified = true;
        }
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(String::from).collect()
}

/// Byte offset of the `col`-th character, or the line length past the end.
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map_or(line.len(), |(i, _)| i)
}
