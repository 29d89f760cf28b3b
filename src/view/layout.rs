//! Top bar rendering (artist search input, local filter input)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, SearchState, UiState};

pub fn render_top_bar(frame: &mut Frame, area: Rect, search: &SearchState, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let artist_title = if ui_state.is_fetching {
        " Artist (fetching...) "
    } else {
        " Artist (Enter to fetch) "
    };
    render_input(
        frame,
        chunks[0],
        artist_title,
        &search.artist_query,
        "Type an artist...",
        ui_state.active_section == ActiveSection::Artist,
    );

    render_input(
        frame,
        chunks[1],
        " Filter ",
        &search.filter_text,
        "Filter by song, album or artist...",
        ui_state.active_section == ActiveSection::Filter,
    );
}

fn render_input(frame: &mut Frame, area: Rect, title: &str, value: &str, placeholder: &str, focused: bool) {
    let (text, style) = if value.is_empty() {
        (placeholder, Style::default().fg(Color::DarkGray))
    } else if focused {
        (value, Style::default().fg(Color::Green))
    } else {
        (value, Style::default().fg(Color::White))
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .padding(Padding::horizontal(1))
            .border_style(if focused {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            }),
    );
    frame.render_widget(input, area);

    if focused {
        if let Some(cursor_x) = input_cursor_x(area, value) {
            frame.set_cursor_position((cursor_x, area.y.saturating_add(1)));
        }
    }
}

/// Column just after the typed text, or `None` once it runs past the border
fn input_cursor_x(area: Rect, value: &str) -> Option<u16> {
    // border + padding on the left, then the typed text
    let typed = u16::try_from(value.chars().count()).unwrap_or(u16::MAX);
    let cursor_x = area.x.saturating_add(2).saturating_add(typed);
    let right_border = area.x.saturating_add(area.width.saturating_sub(1));
    (cursor_x < right_border).then_some(cursor_x)
}
