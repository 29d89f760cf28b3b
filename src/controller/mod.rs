//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives searches and playback.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `search`: Catalog fetches
//! - `playback`: Preview play/pause/stop

mod input;
mod search;
mod playback;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::audio::{AudioEngine, PlaybackError, RodioEngine};
use crate::model::{AppModel, CatalogClient, PlaybackController, SearchError};

pub struct AppController<E: AudioEngine = RodioEngine> {
    pub(crate) model: Arc<AppModel>,
    pub(crate) playback: Arc<Mutex<PlaybackController<E>>>,
    pub(crate) catalog: CatalogClient,
}

impl<E: AudioEngine> Clone for AppController<E> {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            playback: self.playback.clone(),
            catalog: self.catalog.clone(),
        }
    }
}

impl<E: AudioEngine> AppController<E> {
    pub fn new(model: Arc<AppModel>, engine: E, catalog: CatalogClient) -> Self {
        Self {
            model,
            playback: Arc::new(Mutex::new(PlaybackController::new(engine))),
            catalog,
        }
    }

    pub(crate) fn format_search_error(error: &SearchError) -> String {
        match error {
            SearchError::InvalidUrl { .. } => "Search address is invalid.".to_string(),
            SearchError::Transport(_) => "Could not reach the catalog. Check your connection.".to_string(),
            SearchError::Status(status) => format!("Catalog returned an error ({}).", status.as_u16()),
            SearchError::Decode(_) => "Catalog sent an unexpected response.".to_string(),
        }
    }

    pub(crate) fn format_playback_error(error: &PlaybackError) -> String {
        match error {
            PlaybackError::InvalidUrl { .. } => "This track has no playable preview.".to_string(),
            PlaybackError::Download(_) => "Could not download the preview.".to_string(),
            PlaybackError::NoOutputDevice => "No audio output device found.".to_string(),
            PlaybackError::Output(_) => "Audio output failed.".to_string(),
            PlaybackError::Decode(_) => "Preview format is not supported.".to_string(),
        }
    }
}
