//! Preview playback state machine
//!
//! Every result row is `Stopped`, `Playing` or `Paused`, but only the row whose
//! preview is loaded can be anything other than `Stopped`. The controller owns
//! the single session slot: selecting a new preview always tears the old
//! session down before the new one is opened.

use std::sync::Arc;

use url::Url;

use crate::audio::{AudioEngine, AudioSession, PlaybackError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayerState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Snapshot of the session slot, published after every transition
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaybackStatus {
    pub loaded_url: Option<String>,
    pub state: PlayerState,
}

impl PlaybackStatus {
    /// State of the row whose preview lives at `preview_url`
    pub fn state_for(&self, preview_url: &str) -> PlayerState {
        match &self.loaded_url {
            Some(url) if url == preview_url => self.state,
            _ => PlayerState::Stopped,
        }
    }
}

struct PlaybackSession<S> {
    url: String,
    handle: S,
    state: PlayerState,
}

impl<S: AudioSession> PlaybackSession<S> {
    fn toggle(&mut self) {
        self.state = match self.state {
            PlayerState::Playing => {
                self.handle.pause();
                PlayerState::Paused
            }
            PlayerState::Paused | PlayerState::Stopped => {
                self.handle.play();
                PlayerState::Playing
            }
        };
    }
}

/// What a tap needs next. Returned by [`PlaybackController::begin_tap`].
#[derive(Debug)]
pub enum TapPlan {
    /// The loaded preview was paused or resumed in place
    Toggled(PlaybackStatus),
    /// The previous session is gone and `url` has to be opened. Hand the
    /// result to [`PlaybackController::finish_load`] along with `ticket`.
    Load {
        url: Url,
        preview_url: String,
        ticket: u64,
    },
}

pub struct PlaybackController<E: AudioEngine> {
    engine: Arc<E>,
    current: Option<PlaybackSession<E::Session>>,
    /// Bumped by every load and every stop. A load only installs its
    /// session if its ticket is still the latest.
    ticket: u64,
}

impl<E: AudioEngine> PlaybackController<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine: Arc::new(engine),
            current: None,
            ticket: 0,
        }
    }

    /// Shared handle to the engine, so a load can run without holding the
    /// controller
    pub fn engine(&self) -> Arc<E> {
        self.engine.clone()
    }

    /// Handles a tap on the row with `preview_url`.
    ///
    /// Tapping the loaded preview pauses or resumes it in place. Tapping any
    /// other preview releases the current session and loads the new one. If
    /// loading fails nothing is left loaded.
    pub async fn tap(&mut self, preview_url: &str) -> Result<PlaybackStatus, PlaybackError> {
        match self.begin_tap(preview_url)? {
            TapPlan::Toggled(status) => Ok(status),
            TapPlan::Load {
                url,
                preview_url,
                ticket,
            } => {
                let opened = self.engine.open(&url).await;
                self.finish_load(ticket, preview_url, opened)
            }
        }
    }

    /// First half of a tap. Toggles the loaded preview, or releases it and
    /// hands out a ticket for loading the new one.
    pub fn begin_tap(&mut self, preview_url: &str) -> Result<TapPlan, PlaybackError> {
        if let Some(session) = self.current.as_mut() {
            if session.url == preview_url {
                session.toggle();
                tracing::debug!(url = preview_url, state = ?session.state, "Toggled preview");
                return Ok(TapPlan::Toggled(self.status()));
            }
        }

        self.release();
        self.ticket += 1;

        let url = Url::parse(preview_url).map_err(|source| PlaybackError::InvalidUrl {
            url: preview_url.to_string(),
            source,
        })?;

        Ok(TapPlan::Load {
            url,
            preview_url: preview_url.to_string(),
            ticket: self.ticket,
        })
    }

    /// Second half of a tap. Starts the opened session unless a later tap or
    /// a stop has superseded it, in which case the session is torn down.
    pub fn finish_load(
        &mut self,
        ticket: u64,
        preview_url: String,
        opened: Result<E::Session, PlaybackError>,
    ) -> Result<PlaybackStatus, PlaybackError> {
        let handle = opened?;

        if ticket != self.ticket {
            tracing::debug!(url = %preview_url, "Discarding superseded preview");
            handle.stop();
            return Ok(self.status());
        }

        self.release();
        handle.play();
        tracing::info!(url = %preview_url, "Preview playing");
        self.current = Some(PlaybackSession {
            url: preview_url,
            handle,
            state: PlayerState::Playing,
        });

        Ok(self.status())
    }

    /// Releases the session and abandons any load still in flight
    pub fn stop(&mut self) -> PlaybackStatus {
        self.ticket += 1;
        self.release();
        self.status()
    }

    /// Drops the session once its clip has played out. Returns true if it did.
    pub fn release_if_finished(&mut self) -> bool {
        let finished = self
            .current
            .as_ref()
            .is_some_and(|session| session.handle.is_finished());
        if finished {
            tracing::debug!("Preview finished");
            self.release();
        }
        finished
    }

    pub fn status(&self) -> PlaybackStatus {
        match &self.current {
            Some(session) => PlaybackStatus {
                loaded_url: Some(session.url.clone()),
                state: session.state,
            },
            None => PlaybackStatus::default(),
        }
    }

    fn release(&mut self) {
        if let Some(session) = self.current.take() {
            session.handle.stop();
            tracing::debug!(url = %session.url, "Released preview session");
        }
    }
}
