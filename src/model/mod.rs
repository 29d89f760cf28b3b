//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: UI-facing type definitions (focus, status, now playing)
//! - `track`: Catalog records and the result rows derived from them
//! - `search_state`: Query, filter and result rows with the filtered view
//! - `playback`: The single-session preview state machine
//! - `catalog_client`: iTunes search API client
//! - `app_model`: Main application model with state management methods

mod types;
mod track;
mod search_state;
mod playback;
mod catalog_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{ActiveSection, NowPlaying, UiState};

pub use track::{TrackRecord, TrackViewItem};

pub use search_state::SearchState;

pub use playback::{PlaybackController, PlaybackStatus, PlayerState, TapPlan};

pub use catalog_client::{CatalogClient, SearchError};

pub use app_model::AppModel;
