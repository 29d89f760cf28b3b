//! Test doubles shared by the unit tests

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use rodio::decoder::DecoderError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use url::Url;

use crate::audio::{AudioEngine, AudioSession, PlaybackError};
use crate::model::TrackRecord;

/// In-memory audio engine that records every call as `"<verb> <url>"`
#[derive(Clone, Default)]
pub struct FakeEngine {
    events: Arc<Mutex<Vec<String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    hanging: Arc<Mutex<HashSet<String>>>,
    finished: Arc<AtomicBool>,
}

impl FakeEngine {
    /// Makes `open` fail for `url` as if the clip could not be decoded
    pub fn failing_on(self, url: &str) -> Self {
        self.failing.lock().unwrap().insert(url.to_string());
        self
    }

    /// Makes `open` for `url` never complete, like a stalled download
    pub fn hanging_on(self, url: &str) -> Self {
        self.hanging.lock().unwrap().insert(url.to_string());
        self
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn open_count(&self) -> usize {
        self.events().iter().filter(|e| e.starts_with("open ")).count()
    }

    /// Marks the most recently opened clip as played out
    pub fn finish_current(&self) {
        self.finished.store(true, Ordering::SeqCst);
    }
}

impl AudioEngine for FakeEngine {
    type Session = FakeSession;

    async fn open(&self, url: &Url) -> Result<FakeSession, PlaybackError> {
        self.events.lock().unwrap().push(format!("open {url}"));
        let hangs = self.hanging.lock().unwrap().contains(url.as_str());
        if hangs {
            std::future::pending::<()>().await;
        }
        if self.failing.lock().unwrap().contains(url.as_str()) {
            return Err(PlaybackError::Decode(DecoderError::UnrecognizedFormat));
        }
        self.finished.store(false, Ordering::SeqCst);

        Ok(FakeSession {
            url: url.to_string(),
            events: self.events.clone(),
            finished: self.finished.clone(),
        })
    }
}

pub struct FakeSession {
    url: String,
    events: Arc<Mutex<Vec<String>>>,
    finished: Arc<AtomicBool>,
}

impl FakeSession {
    fn record(&self, verb: &str) {
        self.events.lock().unwrap().push(format!("{verb} {}", self.url));
    }
}

impl AudioSession for FakeSession {
    fn play(&self) {
        self.record("play");
    }

    fn pause(&self) {
        self.record("pause");
    }

    fn stop(&self) {
        self.record("stop");
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

/// Serves exactly one HTTP response on a random local port.
///
/// Returns the endpoint URL to point a client at and a receiver for the
/// request line the server saw (e.g. `GET /search?term=x&entity=song HTTP/1.1`).
pub async fn serve_once(status: u16, body: impl Into<Vec<u8>>) -> (String, oneshot::Receiver<String>) {
    let body = body.into();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (request_tx, request_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let request = String::from_utf8_lossy(&request);
        let request_line = request.lines().next().unwrap_or_default().to_string();
        let _ = request_tx.send(request_line);

        let head = format!(
            "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(&body).await.unwrap();
        socket.shutdown().await.ok();
    });

    (format!("http://{addr}/search"), request_rx)
}

pub fn record(id: i64, track: &str, artist: &str, collection: &str) -> TrackRecord {
    TrackRecord {
        track_id: id,
        track_name: track.to_string(),
        artist_name: artist.to_string(),
        collection_name: collection.to_string(),
        artwork_url100: format!("https://art.example/{id}.jpg"),
        preview_url: format!("https://audio.example/{id}.m4a"),
    }
}

/// JSON body of a search response containing `records`
pub fn response_body(records: &[TrackRecord]) -> String {
    let results: Vec<String> = records
        .iter()
        .map(|r| {
            serde_json::json!({
                "wrapperType": "track",
                "trackId": r.track_id,
                "trackName": r.track_name,
                "artistName": r.artist_name,
                "collectionName": r.collection_name,
                "artworkUrl100": r.artwork_url100,
                "previewUrl": r.preview_url,
            })
            .to_string()
        })
        .collect();
    format!(
        r#"{{"resultCount":{},"results":[{}]}}"#,
        records.len(),
        results.join(",")
    )
}
