//! Result list rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Padding, Paragraph, ListItem},
    Frame,
};

use crate::model::{ActiveSection, PlayerState, SearchState, TrackViewItem, UiState};
use super::utils::{calculate_track_column_widths, render_scrollable_list, truncate_string};

pub fn render_results(frame: &mut Frame, area: Rect, search: &SearchState, ui_state: &UiState) {
    let is_focused = ui_state.active_section == ActiveSection::Results;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let filtered = search.filtered();

    let mut title = format!(" Songs ({} of {}) ", filtered.len(), search.items.len());
    if let Some(fetched) = ui_state.last_fetched {
        title.push_str(&format!("· updated {} ", fetched.format("%H:%M:%S")));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style);

    if filtered.is_empty() {
        let hint = if ui_state.is_fetching {
            "Fetching...".to_string()
        } else if search.items.is_empty() {
            "Type an artist and press Enter to fetch songs\n\nUse Tab to move between fields\nPress H in the list for help".to_string()
        } else {
            format!("No songs match \"{}\"", search.filter_text)
        };
        let empty = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block.padding(Padding::horizontal(1)));
        frame.render_widget(empty, area);
        return;
    }

    // Borders take two columns
    let content_width = area.width.saturating_sub(2) as usize;
    let (title_width, collection_width, artist_width) = calculate_track_column_widths(content_width);

    let items: Vec<ListItem> = filtered
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let line = format!(
                " {}   {}   {}   {}",
                state_icon(track),
                truncate_string(&track.track_name, title_width),
                truncate_string(&track.collection_name, collection_width),
                truncate_string(&track.artist_name, artist_width),
            );
            ListItem::new(line).style(row_style(track, i == search.selected, is_focused))
        })
        .collect();

    render_scrollable_list(frame, area, items, search.selected, block);
}

fn state_icon(track: &TrackViewItem) -> &'static str {
    match track.state {
        PlayerState::Playing => "▶ ",
        PlayerState::Paused => "⏸ ",
        PlayerState::Stopped => "  ",
    }
}

fn row_style(track: &TrackViewItem, is_selected: bool, is_focused: bool) -> Style {
    let base = if track.is_playing() {
        Style::default().fg(Color::Green)
    } else if track.state == PlayerState::Paused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    if is_selected && is_focused {
        base.bg(Color::DarkGray).add_modifier(Modifier::BOLD)
    } else if is_selected {
        base.add_modifier(Modifier::BOLD)
    } else {
        base
    }
}
