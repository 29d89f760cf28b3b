//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (truncation, column widths, scrollable lists)
//! - `layout`: Top bar with the artist and filter inputs
//! - `results`: The filtered result list
//! - `now_playing`: Bottom bar describing the loaded preview
//! - `overlays`: Status notification and help popup

mod utils;
mod layout;
mod results;
mod now_playing;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{PlaybackStatus, SearchState, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, search: &SearchState, ui_state: &UiState, playback: &PlaybackStatus) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Artist + filter inputs
                Constraint::Min(0),    // Results
                Constraint::Length(3), // Now playing
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], search, ui_state);

        results::render_results(frame, chunks[1], search, ui_state);

        now_playing::render_now_playing(frame, chunks[2], ui_state, playback);

        if ui_state.status_message.is_some() {
            overlays::render_status_notification(frame, ui_state);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
