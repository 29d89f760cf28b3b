//! Catalog fetches
//!
//! `fetch_data` is the single fetch operation. It runs once at startup and
//! again whenever the user asks for it; both paths go through `spawn_fetch`.

use crate::audio::AudioEngine;
use super::AppController;

impl<E: AudioEngine> AppController<E> {
    pub async fn fetch_data(&self) {
        let artist = self.model.get_search_state().await.artist_query;
        tracing::debug!(artist = %artist, "Fetching tracks");
        self.model.set_fetching(true).await;

        match self.catalog.search(&artist).await {
            Ok(records) => {
                tracing::info!(artist = %artist, tracks = records.len(), "Fetch completed");
                self.model.apply_results(records).await;
            }
            Err(e) => {
                // The previous rows stay on screen
                tracing::error!(artist = %artist, error = %e, "Fetch failed");
                self.model.set_status(Self::format_search_error(&e)).await;
            }
        }

        self.model.set_fetching(false).await;
    }

    /// Runs [`AppController::fetch_data`] in the background.
    /// Overlapping fetches are not coordinated, the last one to finish wins.
    pub fn spawn_fetch(&self) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.fetch_data().await;
        });
    }
}
