//! Search view state: the artist query, the local filter and the result rows
//!
//! The state is never mutated in place. Every update consumes the previous
//! value and returns the next one, and the filtered view is derived on demand.

use super::playback::PlaybackStatus;
use super::track::{TrackRecord, TrackViewItem};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    pub artist_query: String,
    pub filter_text: String,
    pub items: Vec<TrackViewItem>,
    /// Highlighted row, an index into [`SearchState::filtered`]
    pub selected: usize,
}

impl SearchState {
    pub fn with_artist_query(self, artist_query: String) -> Self {
        Self {
            artist_query,
            ..self
        }
    }

    /// Changes the filter and moves the highlight back to the first row
    pub fn with_filter_text(self, filter_text: String) -> Self {
        Self {
            filter_text,
            selected: 0,
            ..self
        }
    }

    /// Replaces every row with freshly fetched records
    pub fn with_results(self, records: Vec<TrackRecord>, playback: &PlaybackStatus) -> Self {
        let items = records
            .into_iter()
            .map(|record| TrackViewItem::from(record).with_playback(playback))
            .collect();
        Self {
            items,
            selected: 0,
            ..self
        }
    }

    /// Re-derives every row's play state from the session snapshot
    pub fn with_playback(self, playback: &PlaybackStatus) -> Self {
        let items = self
            .items
            .into_iter()
            .map(|item| item.with_playback(playback))
            .collect();
        Self { items, ..self }
    }

    /// Moves the highlight by `delta` rows, clamped to the filtered view
    pub fn with_selection_moved(self, delta: isize) -> Self {
        let len = self.filtered().len();
        let selected = if len == 0 {
            0
        } else {
            self.selected
                .saturating_add_signed(delta)
                .min(len - 1)
        };
        Self { selected, ..self }
    }

    pub fn filtered(&self) -> Vec<&TrackViewItem> {
        filter_items(&self.items, &self.filter_text)
    }

    pub fn selected_item(&self) -> Option<&TrackViewItem> {
        self.filtered().get(self.selected).copied()
    }
}

/// Rows whose track, collection or artist name contains `filter`, ignoring case.
/// An empty filter keeps every row. Order is preserved.
pub fn filter_items<'a>(items: &'a [TrackViewItem], filter: &str) -> Vec<&'a TrackViewItem> {
    if filter.is_empty() {
        return items.iter().collect();
    }

    let needle = filter.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.track_name.to_lowercase().contains(&needle)
                || item.collection_name.to_lowercase().contains(&needle)
                || item.artist_name.to_lowercase().contains(&needle)
        })
        .collect()
}
