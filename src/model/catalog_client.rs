//! iTunes catalog search client

use thiserror::Error;
use url::Url;

use crate::{log_api_request, log_api_result};
use super::track::{SearchResponse, TrackRecord};

pub const SEARCH_ENDPOINT: &str = "https://itunes.apple.com/search";
pub const SEARCH_ENTITY: &str = "song";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("search request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("search returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("search response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => SearchError::Status(status),
            None => SearchError::Transport(err),
        }
    }
}

/// Trims and lowercases the artist typed by the user.
///
/// Spaces are left in place, form-urlencoding turns them into `+` when the
/// term is put into the query string.
pub fn sanitize_artist(artist: &str) -> String {
    artist.trim().to_lowercase()
}

#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    endpoint: String,
}

impl CatalogClient {
    pub fn new() -> Self {
        Self::with_endpoint(SEARCH_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    pub fn search_url(&self, artist: &str) -> Result<Url, SearchError> {
        let term = sanitize_artist(artist);
        Url::parse_with_params(&self.endpoint, [("term", term.as_str()), ("entity", SEARCH_ENTITY)])
            .map_err(|source| SearchError::InvalidUrl {
                url: self.endpoint.clone(),
                source,
            })
    }

    /// Runs one search for `artist`. No retries and no paging.
    pub async fn search(&self, artist: &str) -> Result<Vec<TrackRecord>, SearchError> {
        let url = self.search_url(artist)?;
        log_api_request!("search", %url);

        let result = self.fetch(url).await;
        log_api_result!("search", result);

        result
    }

    async fn fetch(&self, url: Url) -> Result<Vec<TrackRecord>, SearchError> {
        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        decode_response(&body)
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

pub fn decode_response(body: &[u8]) -> Result<Vec<TrackRecord>, SearchError> {
    let response: SearchResponse = serde_json::from_slice(body)?;
    Ok(response.results)
}
