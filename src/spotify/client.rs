//! Spotify Web API HTTP client

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, warn};

use super::auth::SpotifySession;
use super::models::{PlaylistResponse, PlaylistSummary, Track, TracksPage};

const API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Tracks per page request; the catalog caps playlist pages at 50 items
pub const PAGE_SIZE: u32 = 50;

/// HTTP client for the Spotify Web API
#[derive(Clone)]
pub struct SpotifyClient {
    base_url: String,
    session: SpotifySession,
    http_client: Client,
}

impl SpotifyClient {
    /// Create a client bound to an authenticated session
    pub fn new(session: SpotifySession) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("spotitube/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: API_BASE_URL.to_string(),
            session,
            http_client,
        })
    }

    /// Fetch playlist name and total track count
    ///
    /// Any non-success status is fatal: the id is unknown, private, or the
    /// token is no longer accepted.
    pub async fn playlist(&self, id: &str) -> Result<PlaylistSummary> {
        let url = format!(
            "{}/playlists/{}?fields={}",
            self.base_url,
            id,
            urlencoding::encode("name,tracks.total")
        );
        debug!("Fetching playlist metadata: {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", self.session.authorization())
            .send()
            .await
            .context("Failed to reach the Spotify API")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Playlist not found or inaccessible (status {})",
                response.status()
            );
        }

        let playlist: PlaylistResponse = response
            .json()
            .await
            .context("Failed to parse playlist response")?;

        Ok(playlist.into())
    }

    /// Fetch the full track list in pages of [`PAGE_SIZE`]
    ///
    /// Pages are requested in catalog order and concatenated. A failed page
    /// contributes zero items instead of aborting the fetch; the resulting
    /// gap is logged because it is indistinguishable from an empty page
    /// downstream.
    pub async fn playlist_tracks(&self, id: &str, total: u32) -> Result<Vec<Option<Track>>> {
        let mut tracks: Vec<Option<Track>> = Vec::with_capacity(total as usize);

        for offset in page_offsets(total) {
            match self.tracks_page(id, offset).await {
                Ok(page) => {
                    tracks.extend(page.items.into_iter().map(|item| item.track));
                }
                Err(e) => {
                    warn!(
                        "Dropping playlist page at offset {} ({} of {} tracks will be missing): {}",
                        offset,
                        PAGE_SIZE.min(total - offset),
                        total,
                        e
                    );
                }
            }
        }

        debug!("Fetched {} of {} track slots", tracks.len(), total);
        Ok(tracks)
    }

    async fn tracks_page(&self, id: &str, offset: u32) -> Result<TracksPage> {
        let url = format!(
            "{}/playlists/{}/tracks?fields={}&limit={}&offset={}",
            self.base_url,
            id,
            urlencoding::encode("items.track.name,items.track.artists.name"),
            PAGE_SIZE,
            offset
        );
        debug!("Fetching tracks page: {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", self.session.authorization())
            .send()
            .await
            .context("Failed to reach the Spotify API")?
            .error_for_status()
            .context("Tracks page request failed")?;

        response
            .json()
            .await
            .context("Failed to parse tracks page response")
    }
}

/// Offsets of the page requests needed to cover `total` tracks
///
/// Exactly `ceil(total / PAGE_SIZE)` offsets, each a multiple of the page
/// size, in catalog order.
pub fn page_offsets(total: u32) -> Vec<u32> {
    (0..total.div_ceil(PAGE_SIZE)).map(|i| i * PAGE_SIZE).collect()
}
