use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use crate::app::{App, AppMode};
use crate::ui::create_titled_block;

/// Draw the chapter list, marking chapters that already hold text.
pub fn draw_chapter_list(f: &mut Frame, app: &mut App, area: Rect) {
    let mut filled = 0;
    let items: Vec<ListItem> = app
        .chapters
        .iter()
        .enumerate()
        .map(|(i, chapter)| {
            let is_filled = app.store.is_filled(&chapter.key());
            if is_filled {
                filled += 1;
            }

            let marker = if is_filled {
                Span::styled("✓ ", Style::default().fg(Color::Green))
            } else {
                Span::raw("  ")
            };
            let text_style = if Some(i) == app.current {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if is_filled {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };

            ListItem::new(Line::from(vec![
                marker,
                Span::styled(chapter.display(), text_style),
            ]))
        })
        .collect();

    let focused = app.mode == AppMode::ChapterList;
    let title = format!("Chapters {filled}/{}", app.chapters.len());
    let list = List::new(items)
        .block(create_titled_block(&title, focused))
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(80, 80, 120))
                .add_modifier(Modifier::BOLD),
        );

    f.render_stateful_widget(list, area, &mut app.chapter_list_state);
}
