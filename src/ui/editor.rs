use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::app::{App, AppMode};
use crate::constants::editor::MIN_WRAP_WIDTH;
use crate::services::editor::{Editor, Selection};
use crate::ui::create_titled_block;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharKind {
    Plain,
    VerseNumber,
    Selected,
}

impl CharKind {
    fn style(self) -> Style {
        match self {
            Self::Plain => Style::default().fg(Color::White),
            Self::VerseNumber => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            Self::Selected => Style::default().bg(Color::Rgb(80, 80, 120)).fg(Color::White),
        }
    }
}

/// Draw the editor pane with the current chapter's text, soft wrapped.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_editor(f: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.mode == AppMode::Editor;
    let title = match app.current_chapter() {
        Some(chapter) if app.buffer.is_modified() => format!("{chapter} [+]"),
        Some(chapter) => chapter.display(),
        None => "Editor".to_string(),
    };

    let block = create_titled_block(&title, focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = (inner.width as usize).max(MIN_WRAP_WIDTH);
    let height = inner.height as usize;
    app.viewport_height = height.max(1);

    let selection = app.buffer.selection();
    let (cursor_line, cursor_col) = app.buffer.cursor_position();

    let mut rows: Vec<Line<'static>> = Vec::new();
    let mut cursor_row = 0;
    let mut cursor_x = 0;

    for (y, line) in app.buffer.content().iter().enumerate() {
        let chars: Vec<char> = line.chars().collect();
        let ranges = wrap_rows(&chars, width);
        if y == cursor_line {
            let (row, x) = cursor_in_rows(&chars, &ranges, cursor_col);
            cursor_row = rows.len() + row;
            cursor_x = x;
        }
        let digits = verse_number_len(&chars);
        for (start, end) in ranges {
            rows.push(style_row(&chars, start, end, y, digits, selection));
        }
    }

    // Keep the cursor row in view
    if cursor_row < app.scroll_offset {
        app.scroll_offset = cursor_row;
    } else if cursor_row >= app.scroll_offset + app.viewport_height {
        app.scroll_offset = cursor_row + 1 - app.viewport_height;
    }

    let visible: Vec<Line> = rows
        .into_iter()
        .skip(app.scroll_offset)
        .take(height)
        .collect();
    f.render_widget(Paragraph::new(visible), inner);

    if focused && !app.is_command_mode && !app.search_active && inner.width > 0 {
        let x = cursor_x.min(inner.width as usize - 1);
        f.set_cursor(
            inner.left() + x as u16,
            inner.top() + (cursor_row - app.scroll_offset) as u16,
        );
    }
}

/// Split a line into display rows no wider than `width` columns.
///
/// Rows are half-open char ranges. Breaks fall after the last space that
/// fits; a word longer than the row is broken mid-word. An empty line is a
/// single empty row.
pub fn wrap_rows(chars: &[char], width: usize) -> Vec<(usize, usize)> {
    if chars.is_empty() || width == 0 {
        return vec![(0, chars.len())];
    }

    let mut rows = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let mut used = 0;
        let mut end = start;
        let mut last_space = None;

        while end < chars.len() {
            let w = chars[end].width().unwrap_or(0);
            if used + w > width && end > start {
                break;
            }
            used += w;
            if chars[end] == ' ' {
                last_space = Some(end + 1);
            }
            end += 1;
        }

        if end < chars.len() {
            if let Some(brk) = last_space {
                end = brk;
            }
        }
        rows.push((start, end));
        start = end;
    }
    rows
}

/// Row index and display column of a cursor at char `col`.
pub fn cursor_in_rows(chars: &[char], rows: &[(usize, usize)], col: usize) -> (usize, usize) {
    let last = rows.len().saturating_sub(1);
    for (i, &(start, end)) in rows.iter().enumerate() {
        if col < end || i == last {
            let x = chars[start..col.clamp(start, chars.len())]
                .iter()
                .map(|c| c.width().unwrap_or(0))
                .sum();
            return (i, x);
        }
    }
    (0, 0)
}

fn verse_number_len(chars: &[char]) -> usize {
    chars.iter().take_while(|c| c.is_ascii_digit()).count()
}

fn style_row(
    chars: &[char],
    start: usize,
    end: usize,
    line: usize,
    digits: usize,
    selection: Option<Selection>,
) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_kind = CharKind::Plain;

    for (col, c) in chars.iter().enumerate().take(end).skip(start) {
        let kind = if selection.is_some_and(|s| s.contains(line, col)) {
            CharKind::Selected
        } else if col < digits {
            CharKind::VerseNumber
        } else {
            CharKind::Plain
        };
        if kind != run_kind && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_kind.style()));
        }
        run_kind = kind;
        run.push(*c);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_kind.style()));
    }

    // A selected line break shows as one highlighted cell
    let selects_break = end == chars.len()
        && selection.is_some_and(|s| line < s.end_line && s.contains(line, chars.len()));
    if selects_break {
        spans.push(Span::styled(" ", CharKind::Selected.style()));
    }
    Line::from(spans)
}
