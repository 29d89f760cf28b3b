//! Playback control methods

use crate::audio::AudioEngine;
use crate::model::{NowPlaying, TapPlan, TrackViewItem};

use super::AppController;

impl<E: AudioEngine> AppController<E> {
    /// Taps the highlighted row without blocking input while the preview downloads
    pub async fn spawn_tap_selected(&self) {
        let Some(item) = self.model.get_search_state().await.selected_item().cloned() else {
            return;
        };

        let controller = self.clone();
        tokio::spawn(async move {
            controller.tap_track(&item).await;
        });
    }

    /// Plays, pauses or switches to `item`'s preview.
    ///
    /// The playback lock is only held to release and install sessions, never
    /// while the preview downloads, so stop and quit stay responsive.
    pub async fn tap_track(&self, item: &TrackViewItem) {
        tracing::debug!(track = %item.track_name, url = %item.preview_url, "Track tapped");

        let plan = self.playback.lock().await.begin_tap(&item.preview_url);
        let result = match plan {
            Ok(TapPlan::Toggled(status)) => Ok(status),
            Ok(TapPlan::Load {
                url,
                preview_url,
                ticket,
            }) => {
                // The previous row is already released
                let released = self.playback.lock().await.status();
                self.model.apply_playback(released, None).await;

                self.model.begin_preview_load().await;
                let engine = self.playback.lock().await.engine();
                let opened = engine.open(&url).await;
                let finished = self.playback.lock().await.finish_load(ticket, preview_url, opened);
                self.model.end_preview_load().await;
                finished
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(status) => {
                tracing::info!(track = %item.track_name, state = ?status.state, "Playback updated");
            }
            Err(ref e) => {
                tracing::error!(track = %item.track_name, url = %item.preview_url, error = %e, "Preview failed");
                self.model.set_status(Self::format_playback_error(e)).await;
            }
        }

        let status = self.playback.lock().await.status();
        let now_playing = (status.loaded_url.as_deref() == Some(item.preview_url.as_str()))
            .then(|| NowPlaying::from(item));
        self.model.apply_playback(status, now_playing).await;
    }

    pub async fn stop_playback(&self) {
        let status = self.playback.lock().await.stop();
        tracing::debug!("Playback stopped");
        self.model.apply_playback(status, None).await;
    }

    /// Reverts the row of a clip that played to its end.
    /// Skipped while a tap holds the session slot.
    pub async fn release_finished_preview(&self) {
        let Ok(mut playback) = self.playback.try_lock() else {
            return;
        };
        if !playback.release_if_finished() {
            return;
        }
        let status = playback.status();
        drop(playback);

        self.model.apply_playback(status, None).await;
    }
}
