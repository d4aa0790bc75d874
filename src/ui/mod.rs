//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the application's
//! terminal-based user interface using ratatui.

mod chapter_list;
mod editor;

pub use chapter_list::draw_chapter_list;
pub use editor::draw_editor;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppMode};
use crate::constants::ui::{CHAPTER_LIST_WIDTH, MIN_PANE_WIDTH};
use crate::services::editor::Editor;

/// Render the full application UI to the terminal frame.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3), // Command/status bar at bottom
        ])
        .split(f.size());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(CHAPTER_LIST_WIDTH),
            Constraint::Min(MIN_PANE_WIDTH),
        ])
        .split(chunks[0]);

    draw_chapter_list(f, app, panes[0]);
    draw_editor(f, app, panes[1]);
    draw_command_bar(f, app, chunks[1]);

    if app.search_active && !app.search_results.is_empty() {
        draw_search_results(f, app, chunks[1]);
    }

    // Draw status/info modal (blocking)
    if let Some(status) = &app.status_message {
        draw_status_message(f, status);
        return;
    }
    // Draw error message if present (blocking)
    if let Some(error) = &app.error_message {
        draw_error_message(f, error);
        return;
    }

    if app.show_help {
        draw_help_modal(f, app);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.is_command_mode {
        "Command"
    } else if app.search_active {
        "Go to Chapter"
    } else {
        "Commands/Status"
    };

    let border_color = if app.search_active { Color::Cyan } else { Color::Yellow };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(title, Style::default().fg(border_color)));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    if app.is_command_mode {
        let command = Paragraph::new(format!(" :{}", app.command_buffer))
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(command, inner_area);
        f.set_cursor(
            inner_area.left() + app.command_buffer.width() as u16 + 2,
            inner_area.top(),
        );
    } else if app.search_active {
        let search = Paragraph::new(format!(" /{}", app.search_query))
            .style(Style::default().fg(Color::Cyan));
        f.render_widget(search, inner_area);
        f.set_cursor(
            inner_area.left() + app.search_query.width() as u16 + 2,
            inner_area.top(),
        );
    } else {
        let mut text = match app.mode {
            AppMode::ChapterList => create_help_text(&[
                ("↑/↓", "Chapter"),
                ("/", "Go to"),
                ("Enter", "Edit"),
                (":", "Command"),
                ("F1", "Help"),
            ]),
            AppMode::Editor => create_help_text(&[
                ("Esc", "Chapters"),
                ("^S", "Save"),
                ("^L", "Fix breaks"),
                ("^N", "Normalize"),
                ("^R", "Strip"),
            ]),
        };

        let (line, col) = app.buffer.cursor_position();
        let modified = if app.buffer.is_modified() { " | modified" } else { "" };
        text.push(Span::styled(
            format!(
                " | Ln {}, Col {} | {}{modified}",
                line + 1,
                col + 1,
                app.verse_summary().describe()
            ),
            Style::default().fg(Color::Gray),
        ));

        let status_bar = Paragraph::new(Line::from(text)).style(Style::default().fg(Color::Gray));
        f.render_widget(status_bar, inner_area);
    }
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")]; // Start with padding

    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(
            *key,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        text.push(Span::raw(format!(": {description}")));

        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let title_style = if is_focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let border_style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

// Popup of chapter matches just above the command bar
#[allow(clippy::cast_possible_truncation)]
fn draw_search_results(f: &mut Frame, app: &App, bar: Rect) {
    let height = (app.search_results.len() as u16 + 2).min(bar.top());
    if height < 3 {
        return;
    }
    let area = Rect {
        x: bar.left(),
        y: bar.top() - height,
        width: 30.min(bar.width),
        height,
    };

    let lines: Vec<Line> = app
        .search_results
        .iter()
        .enumerate()
        .filter_map(|(i, idx)| {
            let chapter = app.chapters.get(*idx)?;
            let style = if i == app.search_selection {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if i == app.search_selection { "▶ " } else { "  " };
            Some(Line::from(Span::styled(format!("{prefix}{chapter}"), style)))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

// Draw an error message overlay
fn draw_error_message(f: &mut Frame, message: &str) {
    let size = f.size();

    let width = 60.min(size.width.saturating_sub(4));
    let height = 7.min(size.height);

    let area = Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let block = Block::default()
        .title(Span::styled(
            "Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area); // Clear the area first
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Space after title
            Constraint::Min(1),
            Constraint::Length(1), // Space for a "Press Esc to dismiss" hint
        ])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[1]);

    let hint = Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(hint, inner_area[2]);
}

#[allow(clippy::cast_possible_truncation)]
fn draw_status_message(f: &mut Frame, message: &str) {
    let size = f.size();

    // Calculate box width (max 80% of screen, min 50)
    let max_width = (size.width as usize * 80) / 100;
    let width = message.width().saturating_add(6).min(max_width).max(50) as u16;
    let width = width.min(size.width);

    // Calculate how many lines the message will need when wrapped
    let inner_width = (width.saturating_sub(4) as usize).max(1);
    let msg_lines = message.width().div_ceil(inner_width);
    let height = (msg_lines as u16 + 4).min(size.height);

    let area = Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let block = Block::default()
        .title(Span::styled(
            "Info",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // message (flexible)
            Constraint::Length(1), // hint
        ])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[0]);

    let hint = Paragraph::new("Press Esc or Enter to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(hint, inner_area[1]);
}

// Draw the help modal with keybindings
fn draw_help_modal(f: &mut Frame, app: &App) {
    let size = f.size();

    let width = 64.min(size.width.saturating_sub(4));
    let height = 30.min(size.height.saturating_sub(2));

    let area = Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let block = Block::default()
        .title(Span::styled(
            " Help - Keybindings ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let inner_area = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let help_text: Vec<Line> = build_help_content(app.mode)
        .iter()
        .map(|(key, desc, is_header)| {
            if *is_header {
                Line::from(vec![Span::styled(
                    *key,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )])
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{key:>14}"),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(*desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    f.render_widget(Paragraph::new(help_text).wrap(Wrap { trim: true }), inner_area);
}

// Build help content, putting the focused pane's keys first
fn build_help_content(mode: AppMode) -> Vec<(&'static str, &'static str, bool)> {
    let list = [
        ("── Chapters ──", "", true),
        ("↑/↓ or j/k", "Select chapter", false),
        ("PgUp/PgDn", "Move a page", false),
        ("/", "Go to chapter (e.g. 1 cor 13)", false),
        ("Enter / Tab", "Edit chapter", false),
        ("", "", false),
    ];
    let editor = [
        ("── Editor ──", "", true),
        ("Arrows", "Move cursor", false),
        ("Shift+Arrows", "Select text", false),
        ("Ctrl+A", "Select all", false),
        ("Ctrl+C/X/V", "Copy/Cut/Paste", false),
        ("Esc / Tab", "Back to chapters", false),
        ("", "", false),
    ];

    let mut lines = Vec::new();
    match mode {
        AppMode::ChapterList => {
            lines.extend(list);
            lines.extend(editor);
        }
        AppMode::Editor => {
            lines.extend(editor);
            lines.extend(list);
        }
    }

    lines.extend([
        ("── Actions ──", "", true),
        ("Ctrl+S  :w", "Save chapter", false),
        ("Ctrl+L  :fix", "Fix line breaks", false),
        ("Ctrl+N  :norm", "Normalize verses", false),
        (":prep", "Fix breaks, then normalize", false),
        ("Ctrl+R", "Strip symbols (:strip <chars>)", false),
        (":q  :wq  :q!", "Quit / save and quit / discard", false),
        ("", "", false),
        ("Press Esc, F1 or ? to close", "", true),
    ]);

    lines
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_create_help_text() {
        let spans = create_help_text(&[("^S", "Save"), ("^L", "Fix")]);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " ^S: Save | ^L: Fix");
    }

    #[test]
    fn test_help_lists_focused_pane_first() {
        let lines = build_help_content(AppMode::Editor);
        assert_eq!(lines[0].0, "── Editor ──");
        let lines = build_help_content(AppMode::ChapterList);
        assert_eq!(lines[0].0, "── Chapters ──");
    }
}
