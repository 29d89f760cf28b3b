//! Utility functions for rendering UI components

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, List, ListItem, ListState},
    Frame,
};

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Pads or cuts `s` to exactly `max_width` characters
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}

/// Calculate column widths for a result row.
/// Returns (title_width, collection_width, artist_width)
pub fn calculate_track_column_widths(content_width: usize) -> (usize, usize, usize) {
    // Format: " {icon}   {title}   {collection}   {artist}"
    let fixed_width = 1 + 2 + 3 + 3 + 3;
    let remaining_width = content_width.saturating_sub(fixed_width);
    let title_width = (remaining_width * 40) / 100;
    let collection_width = (remaining_width * 30) / 100;
    let artist_width = remaining_width.saturating_sub(title_width + collection_width);

    (title_width, collection_width, artist_width)
}
