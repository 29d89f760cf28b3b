//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use tokio::sync::Mutex;

use super::playback::PlaybackStatus;
use super::search_state::SearchState;
use super::track::TrackRecord;
use super::types::{ActiveSection, NowPlaying, UiState};

/// Status messages disappear after this long
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

/// Main application model containing all state.
///
/// The render loop reads clones of each part every frame, the controller
/// replaces them through the methods below.
pub struct AppModel {
    search_state: Arc<Mutex<SearchState>>,
    playback_status: Arc<Mutex<PlaybackStatus>>,
    ui_state: Arc<Mutex<UiState>>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            search_state: Arc::new(Mutex::new(SearchState::default())),
            playback_status: Arc::new(Mutex::new(PlaybackStatus::default())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    // ========================================================================
    // Search state
    // ========================================================================

    pub async fn get_search_state(&self) -> SearchState {
        self.search_state.lock().await.clone()
    }

    /// Swaps the search state for `update(previous)`
    pub async fn update_search<F>(&self, update: F)
    where
        F: FnOnce(SearchState) -> SearchState,
    {
        let mut state = self.search_state.lock().await;
        let previous = std::mem::take(&mut *state);
        *state = update(previous);
    }

    pub async fn append_to_artist(&self, c: char) {
        self.update_search(|s| {
            let mut query = s.artist_query.clone();
            query.push(c);
            s.with_artist_query(query)
        })
        .await;
    }

    pub async fn backspace_artist(&self) {
        self.update_search(|s| {
            let mut query = s.artist_query.clone();
            query.pop();
            s.with_artist_query(query)
        })
        .await;
    }

    pub async fn append_to_filter(&self, c: char) {
        self.update_search(|s| {
            let mut filter = s.filter_text.clone();
            filter.push(c);
            s.with_filter_text(filter)
        })
        .await;
    }

    pub async fn backspace_filter(&self) {
        self.update_search(|s| {
            let mut filter = s.filter_text.clone();
            filter.pop();
            s.with_filter_text(filter)
        })
        .await;
    }

    pub async fn move_selection(&self, delta: isize) {
        self.update_search(|s| s.with_selection_moved(delta)).await;
    }

    /// Replaces the result rows after a successful fetch
    pub async fn apply_results(&self, records: Vec<TrackRecord>) {
        // Lock order is playback then search, as in apply_playback
        let playback = self.playback_status.lock().await;
        self.update_search(|s| s.with_results(records, &playback)).await;
        drop(playback);

        let mut ui = self.ui_state.lock().await;
        ui.last_fetched = Some(Local::now());
    }

    // ========================================================================
    // Playback
    // ========================================================================

    pub async fn get_playback_status(&self) -> PlaybackStatus {
        self.playback_status.lock().await.clone()
    }

    /// Publishes a new session snapshot and re-derives every row from it.
    ///
    /// `now_playing` replaces the bar's track when given. With `None` the bar
    /// keeps its track while something is loaded and clears otherwise.
    pub async fn apply_playback(&self, status: PlaybackStatus, now_playing: Option<NowPlaying>) {
        let mut current = self.playback_status.lock().await;
        *current = status;
        self.update_search(|s| s.with_playback(&current)).await;
        let loaded = current.loaded_url.is_some();
        drop(current);

        let mut ui = self.ui_state.lock().await;
        if !loaded {
            ui.now_playing = None;
        } else if now_playing.is_some() {
            ui.now_playing = now_playing;
        }
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn active_section(&self) -> ActiveSection {
        self.ui_state.lock().await.active_section
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        self.ui_state.lock().await.active_section = section;
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn set_fetching(&self, fetching: bool) {
        self.ui_state.lock().await.is_fetching = fetching;
    }

    pub async fn begin_preview_load(&self) {
        self.ui_state.lock().await.pending_previews += 1;
    }

    pub async fn end_preview_load(&self) {
        let mut state = self.ui_state.lock().await;
        state.pending_previews = state.pending_previews.saturating_sub(1);
    }

    pub async fn set_status(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.status_message = Some(message);
        state.status_timestamp = Some(Instant::now());
    }

    pub async fn clear_status(&self) {
        let mut state = self.ui_state.lock().await;
        state.status_message = None;
        state.status_timestamp = None;
    }

    pub async fn auto_clear_old_status(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.status_timestamp {
            if timestamp.elapsed() >= STATUS_TIMEOUT {
                state.status_message = None;
                state.status_timestamp = None;
            }
        }
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn set_help_popup(&self, open: bool) {
        self.ui_state.lock().await.show_help_popup = open;
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlayerState;
    use crate::test_support::record;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn typing_edits_query_and_filter() {
        let model = AppModel::new();

        for c in "adelex".chars() {
            model.append_to_artist(c).await;
        }
        model.backspace_artist().await;
        model.append_to_filter('h').await;
        model.append_to_filter('i').await;
        model.backspace_filter().await;

        let state = model.get_search_state().await;
        assert_eq!(state.artist_query, "adele");
        assert_eq!(state.filter_text, "h");
    }

    #[tokio::test]
    async fn results_keep_the_state_of_the_loaded_preview() {
        let model = AppModel::new();
        let track = record(1, "Hello", "Adele", "25");
        let status = PlaybackStatus {
            loaded_url: Some(track.preview_url.clone()),
            state: PlayerState::Playing,
        };
        model.apply_playback(status, None).await;

        model.apply_results(vec![track, record(2, "Skyfall", "Adele", "Skyfall")]).await;

        let state = model.get_search_state().await;
        assert_eq!(state.items[0].state, PlayerState::Playing);
        assert_eq!(state.items[1].state, PlayerState::Stopped);
        assert!(model.get_ui_state().await.last_fetched.is_some());
    }

    #[tokio::test]
    async fn stopping_clears_now_playing() {
        let model = AppModel::new();
        let item = crate::model::TrackViewItem::from(record(1, "Hello", "Adele", "25"));
        let status = PlaybackStatus {
            loaded_url: Some(item.preview_url.clone()),
            state: PlayerState::Playing,
        };
        model.apply_playback(status, Some(NowPlaying::from(&item))).await;
        assert!(model.get_ui_state().await.now_playing.is_some());

        model.apply_playback(PlaybackStatus::default(), Some(NowPlaying::from(&item))).await;

        assert!(model.get_ui_state().await.now_playing.is_none());
    }

    #[tokio::test]
    async fn loading_flag_holds_until_every_preview_load_ends() {
        let model = AppModel::new();

        model.begin_preview_load().await;
        model.begin_preview_load().await;
        model.end_preview_load().await;
        assert!(model.get_ui_state().await.is_loading_preview());

        model.end_preview_load().await;
        assert!(!model.get_ui_state().await.is_loading_preview());

        model.end_preview_load().await;
        assert_eq!(model.get_ui_state().await.pending_previews, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn rows_match_the_published_playback_after_concurrent_updates() {
        for _ in 0..50 {
            let model = Arc::new(AppModel::new());
            let track = record(1, "Hello", "Adele", "25");
            let status = PlaybackStatus {
                loaded_url: Some(track.preview_url.clone()),
                state: PlayerState::Playing,
            };

            let results = tokio::spawn({
                let model = model.clone();
                async move { model.apply_results(vec![track]).await }
            });
            let playback = tokio::spawn({
                let model = model.clone();
                async move { model.apply_playback(status, None).await }
            });
            results.await.unwrap();
            playback.await.unwrap();

            let published = model.get_playback_status().await;
            let row = model.get_search_state().await.items[0].clone();
            assert_eq!(row.state, published.state_for(&row.preview_url));
            assert_eq!(row.state, PlayerState::Playing);
        }
    }

    #[tokio::test]
    async fn keeps_the_bar_track_while_the_same_preview_stays_loaded() {
        let model = AppModel::new();
        let item = crate::model::TrackViewItem::from(record(1, "Hello", "Adele", "25"));
        let playing = PlaybackStatus {
            loaded_url: Some(item.preview_url.clone()),
            state: PlayerState::Playing,
        };
        model.apply_playback(playing.clone(), Some(NowPlaying::from(&item))).await;

        model.apply_playback(playing, None).await;

        assert_eq!(
            model.get_ui_state().await.now_playing.map(|n| n.track_name),
            Some("Hello".to_string())
        );
    }

    #[tokio::test]
    async fn fresh_status_messages_survive_auto_clear() {
        let model = AppModel::new();

        model.set_status("Search failed".to_string()).await;
        model.auto_clear_old_status().await;

        assert_eq!(
            model.get_ui_state().await.status_message.as_deref(),
            Some("Search failed")
        );
    }
}
