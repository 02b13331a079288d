//! Spotify Web API response models
//!
//! One struct per endpoint payload, parsed and validated once at the fetch
//! boundary. Downstream code never touches untyped JSON.

use serde::Deserialize;

/// Response from the client-credentials token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Playlist metadata (`GET /playlists/{id}?fields=name,tracks.total`)
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistResponse {
    pub name: String,
    pub tracks: TracksTotal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TracksTotal {
    pub total: u32,
}

/// Playlist name and track count, as used by the pipeline
#[derive(Debug, Clone)]
pub struct PlaylistSummary {
    pub name: String,
    pub total: u32,
}

impl From<PlaylistResponse> for PlaylistSummary {
    fn from(resp: PlaylistResponse) -> Self {
        Self {
            name: resp.name,
            total: resp.tracks.total,
        }
    }
}

/// One page of playlist tracks (`GET /playlists/{id}/tracks`)
#[derive(Debug, Clone, Deserialize)]
pub struct TracksPage {
    #[serde(default)]
    pub items: Vec<PageItem>,
}

/// A playlist slot; `track` is null when the track was removed from the
/// catalog, which is a valid state rather than an error
#[derive(Debug, Clone, Deserialize)]
pub struct PageItem {
    pub track: Option<Track>,
}

/// Track metadata, immutable once fetched
#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

impl Track {
    /// First listed artist, if any
    pub fn first_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_playlist_response() {
        let json = r#"{"name": "road trip", "tracks": {"total": 120}}"#;
        let resp: PlaylistResponse = serde_json::from_str(json).unwrap();
        let summary = PlaylistSummary::from(resp);
        assert_eq!(summary.name, "road trip");
        assert_eq!(summary.total, 120);
    }

    #[test]
    fn test_parse_tracks_page_with_removed_track() {
        let json = r#"{
            "items": [
                {"track": {"name": "One More Time", "artists": [{"name": "Daft Punk"}]}},
                {"track": null}
            ]
        }"#;
        let page: TracksPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 2);

        let track = page.items[0].track.as_ref().unwrap();
        assert_eq!(track.name, "One More Time");
        assert_eq!(track.first_artist(), Some("Daft Punk"));
        assert!(page.items[1].track.is_none());
    }

    #[test]
    fn test_first_artist_empty_list() {
        let track: Track = serde_json::from_str(r#"{"name": "Untitled"}"#).unwrap();
        assert_eq!(track.first_artist(), None);
    }
}
