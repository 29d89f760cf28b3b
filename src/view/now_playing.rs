//! Now playing bar rendering

use ratatui::{
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    layout::Rect,
    Frame,
};

use crate::model::{PlaybackStatus, PlayerState, UiState};

pub fn render_now_playing(frame: &mut Frame, area: Rect, ui_state: &UiState, playback: &PlaybackStatus) {
    let (status_text, style) = if ui_state.is_loading_preview() {
        (" Loading preview...".to_string(), Style::default().fg(Color::Yellow))
    } else {
        match (&ui_state.now_playing, playback.state) {
            (Some(track), PlayerState::Playing) => (
                format!(
                    " ▶ {} | {} ({})",
                    track.track_name, track.artist_name, track.collection_name
                ),
                Style::default().fg(Color::Green),
            ),
            (Some(track), PlayerState::Paused) => (
                format!(
                    "⏸  {} | {} ({})",
                    track.track_name, track.artist_name, track.collection_name
                ),
                Style::default().fg(Color::White),
            ),
            _ => (" Nothing playing".to_string(), Style::default().fg(Color::DarkGray)),
        }
    };

    let controls_info = " Enter play/pause | S stop | H help ";

    let bar = Paragraph::new(status_text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Preview ")
            .title_bottom(Line::from(controls_info).right_aligned()),
    );

    frame.render_widget(bar, area);
}
