//! Core type definitions for the application

use std::time::Instant;

use chrono::{DateTime, Local};

use super::track::TrackViewItem;

/// Which part of the screen receives key presses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActiveSection {
    #[default]
    Artist,
    Filter,
    Results,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Artist => ActiveSection::Filter,
            ActiveSection::Filter => ActiveSection::Results,
            ActiveSection::Results => ActiveSection::Artist,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Artist => ActiveSection::Results,
            ActiveSection::Filter => ActiveSection::Artist,
            ActiveSection::Results => ActiveSection::Filter,
        }
    }
}

/// The track whose preview is loaded, kept apart from the result rows so a
/// new search does not lose the title of what is still playing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NowPlaying {
    pub track_name: String,
    pub artist_name: String,
    pub collection_name: String,
}

impl From<&TrackViewItem> for NowPlaying {
    fn from(item: &TrackViewItem) -> Self {
        Self {
            track_name: item.track_name.clone(),
            artist_name: item.artist_name.clone(),
            collection_name: item.collection_name.clone(),
        }
    }
}

/// UI state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub status_message: Option<String>,
    pub status_timestamp: Option<Instant>,
    pub show_help_popup: bool,
    pub is_fetching: bool,
    /// Preview downloads still in flight
    pub pending_previews: usize,
    pub now_playing: Option<NowPlaying>,
    pub last_fetched: Option<DateTime<Local>>,
}

impl UiState {
    pub fn is_loading_preview(&self) -> bool {
        self.pending_previews > 0
    }
}
