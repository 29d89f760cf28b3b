//! Catalog track records and the per-row view items derived from them

use serde::Deserialize;

use super::playback::{PlaybackStatus, PlayerState};

/// Artist names longer than this are cut and suffixed with [`ELLIPSIS`]
pub const ARTIST_DISPLAY_LIMIT: usize = 50;
pub const ELLIPSIS: &str = "...";

/// A song as returned by the catalog search endpoint
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    pub track_id: i64,
    pub track_name: String,
    pub artist_name: String,
    pub collection_name: String,
    pub artwork_url100: String,
    pub preview_url: String,
}

/// Envelope of a search response, only `results` is read
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<TrackRecord>,
}

/// One row of the result list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackViewItem {
    pub id: i64,
    pub track_name: String,
    pub collection_name: String,
    pub artist_name: String,
    pub artwork_url: String,
    pub preview_url: String,
    pub state: PlayerState,
}

impl TrackViewItem {
    pub fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    /// Returns the item with its state taken from the current playback snapshot.
    /// Only the item whose preview is loaded can be anything other than stopped.
    pub fn with_playback(mut self, status: &PlaybackStatus) -> Self {
        self.state = status.state_for(&self.preview_url);
        self
    }
}

impl From<TrackRecord> for TrackViewItem {
    fn from(record: TrackRecord) -> Self {
        Self {
            id: record.track_id,
            artist_name: truncate_artist(&record.artist_name),
            track_name: record.track_name,
            collection_name: record.collection_name,
            artwork_url: record.artwork_url100,
            preview_url: record.preview_url,
            state: PlayerState::Stopped,
        }
    }
}

/// Cuts an artist name to [`ARTIST_DISPLAY_LIMIT`] characters plus an ellipsis
pub fn truncate_artist(name: &str) -> String {
    if name.chars().count() > ARTIST_DISPLAY_LIMIT {
        let mut truncated: String = name.chars().take(ARTIST_DISPLAY_LIMIT).collect();
        truncated.push_str(ELLIPSIS);
        truncated
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn record(artist: &str) -> TrackRecord {
        TrackRecord {
            track_id: 7,
            track_name: "Banana Pancakes".to_string(),
            artist_name: artist.to_string(),
            collection_name: "In Between Dreams".to_string(),
            artwork_url100: "https://example.com/art.jpg".to_string(),
            preview_url: "https://example.com/preview.m4a".to_string(),
        }
    }

    #[rstest]
    #[case("")]
    #[case("Jack Johnson")]
    #[case(&"x".repeat(ARTIST_DISPLAY_LIMIT))]
    fn short_names_are_unchanged(#[case] name: &str) {
        assert_eq!(truncate_artist(name), name);
    }

    #[test]
    fn long_names_keep_exactly_the_limit_plus_ellipsis() {
        let name = "a".repeat(ARTIST_DISPLAY_LIMIT + 1);
        let truncated = truncate_artist(&name);

        assert_eq!(truncated, format!("{}...", "a".repeat(ARTIST_DISPLAY_LIMIT)));
        assert_eq!(truncated.chars().count(), ARTIST_DISPLAY_LIMIT + ELLIPSIS.len());
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let name = "é".repeat(60);
        let truncated = truncate_artist(&name);

        assert!(truncated.starts_with(&"é".repeat(ARTIST_DISPLAY_LIMIT)));
        assert!(truncated.ends_with(ELLIPSIS));
        assert_eq!(truncated.chars().count(), ARTIST_DISPLAY_LIMIT + 3);
    }

    #[test]
    fn view_item_copies_record_fields_and_starts_stopped() {
        let item = TrackViewItem::from(record("Jack Johnson"));

        assert_eq!(item.id, 7);
        assert_eq!(item.track_name, "Banana Pancakes");
        assert_eq!(item.collection_name, "In Between Dreams");
        assert_eq!(item.artist_name, "Jack Johnson");
        assert_eq!(item.artwork_url, "https://example.com/art.jpg");
        assert_eq!(item.preview_url, "https://example.com/preview.m4a");
        assert_eq!(item.state, PlayerState::Stopped);
        assert!(!item.is_playing());
    }

    #[test]
    fn record_decodes_from_catalog_json_ignoring_extra_fields() {
        let json = r#"{
            "wrapperType": "track",
            "trackId": 879273552,
            "trackName": "Better Together",
            "artistName": "Jack Johnson",
            "collectionName": "In Between Dreams",
            "artworkUrl100": "https://is1.example/100x100bb.jpg",
            "previewUrl": "https://audio.example/preview.m4a",
            "trackPrice": 1.29
        }"#;

        let decoded: TrackRecord = serde_json::from_str(json).unwrap();

        assert_eq!(decoded.track_id, 879273552);
        assert_eq!(decoded.artwork_url100, "https://is1.example/100x100bb.jpg");
    }
}
