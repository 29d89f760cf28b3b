//! Preview audio output
//!
//! The playback state machine talks to audio through the [`AudioEngine`] and
//! [`AudioSession`] traits. [`RodioEngine`] is the real implementation: it
//! downloads the whole preview clip (they are ~30s AAC files), decodes it with
//! rodio's symphonia backend and plays it on a fresh [`Sink`].

use std::future::Future;
use std::io::Cursor;

use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, OutputStreamHandle, PlayError, Sink, StreamError};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("invalid preview URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("preview download failed: {0}")]
    Download(#[from] reqwest::Error),
    #[error("no audio output device available")]
    NoOutputDevice,
    #[error("audio output failed: {0}")]
    Output(#[from] PlayError),
    #[error("preview could not be decoded: {0}")]
    Decode(#[from] DecoderError),
}

/// A loaded preview that can be started, paused and torn down
pub trait AudioSession: Send + 'static {
    fn play(&self);
    fn pause(&self);
    fn stop(&self);
    /// True once the clip has played to its end
    fn is_finished(&self) -> bool;
}

/// Creates audio sessions for preview URLs
pub trait AudioEngine: Send + Sync + 'static {
    type Session: AudioSession;

    /// Loads the preview at `url`. The returned session is paused.
    fn open(&self, url: &Url) -> impl Future<Output = Result<Self::Session, PlaybackError>> + Send;
}

pub struct RodioEngine {
    http: reqwest::Client,
    output: Option<OutputStreamHandle>,
}

impl RodioEngine {
    /// `output` is `None` when the machine has no usable output device, in
    /// which case every `open` that gets a decodable clip fails with
    /// [`PlaybackError::NoOutputDevice`].
    pub fn new(output: Option<OutputStreamHandle>) -> Self {
        Self {
            http: reqwest::Client::new(),
            output,
        }
    }

    /// Opens the default output device.
    ///
    /// The returned [`OutputStream`] must stay alive for as long as anything
    /// plays, it is not `Send` so `main` keeps it on its own stack.
    pub fn default_output() -> Result<(OutputStream, OutputStreamHandle), StreamError> {
        OutputStream::try_default()
    }
}

impl AudioEngine for RodioEngine {
    type Session = RodioSession;

    async fn open(&self, url: &Url) -> Result<RodioSession, PlaybackError> {
        tracing::debug!(%url, "Downloading preview");
        let bytes = self
            .http
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        tracing::debug!(%url, size = bytes.len(), "Preview downloaded");

        let source = Decoder::new(Cursor::new(bytes.to_vec()))?;
        let output = self.output.as_ref().ok_or(PlaybackError::NoOutputDevice)?;
        let sink = Sink::try_new(output)?;
        sink.pause();
        sink.append(source);

        Ok(RodioSession { sink })
    }
}

pub struct RodioSession {
    sink: Sink,
}

impl AudioSession for RodioSession {
    fn play(&self) {
        self.sink.play();
    }

    fn pause(&self) {
        self.sink.pause();
    }

    fn stop(&self) {
        self.sink.stop();
    }

    fn is_finished(&self) -> bool {
        self.sink.empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;

    /// A short 8 kHz mono 16-bit PCM WAV clip
    fn wav_clip() -> Vec<u8> {
        let samples = [0u8; 64];
        let mut clip = Vec::new();
        clip.extend_from_slice(b"RIFF");
        clip.extend_from_slice(&(36 + samples.len() as u32).to_le_bytes());
        clip.extend_from_slice(b"WAVEfmt ");
        clip.extend_from_slice(&16u32.to_le_bytes());
        clip.extend_from_slice(&1u16.to_le_bytes()); // PCM
        clip.extend_from_slice(&1u16.to_le_bytes()); // mono
        clip.extend_from_slice(&8000u32.to_le_bytes());
        clip.extend_from_slice(&16000u32.to_le_bytes()); // byte rate
        clip.extend_from_slice(&2u16.to_le_bytes()); // block align
        clip.extend_from_slice(&16u16.to_le_bytes());
        clip.extend_from_slice(b"data");
        clip.extend_from_slice(&(samples.len() as u32).to_le_bytes());
        clip.extend_from_slice(&samples);
        clip
    }

    async fn open_served(status: u16, body: Vec<u8>) -> Result<RodioSession, PlaybackError> {
        let (endpoint, _request) = serve_once(status, body).await;
        let url = Url::parse(&endpoint).unwrap();
        RodioEngine::new(None).open(&url).await
    }

    #[tokio::test]
    async fn missing_output_device_fails_the_tap() {
        let result = open_served(200, wav_clip()).await;

        assert!(matches!(result, Err(PlaybackError::NoOutputDevice)));
    }

    #[tokio::test]
    async fn unreachable_preview_is_a_download_error() {
        let result = open_served(404, b"not found".to_vec()).await;

        assert!(matches!(result, Err(PlaybackError::Download(_))));
    }

    #[tokio::test]
    async fn non_audio_bytes_are_a_decode_error() {
        let result = open_served(200, b"<html>definitely not audio</html>".to_vec()).await;

        assert!(matches!(result, Err(PlaybackError::Decode(_))));
    }
}
