//! Search/download provider seam
//!
//! The acquisition pipeline only needs two capabilities from the media
//! source: resolve free text to ranked candidates, and fetch a chosen
//! candidate's audio stream. Keeping them behind a trait lets the pipeline
//! be exercised without a network or a yt-dlp binary.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// One search result from the provider, in ranking order
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Provider-side video id
    pub id: String,
    /// Video title, used only for logging
    pub title: String,
    /// Watch page URL the audio stream is resolved from
    pub url: String,
}

/// External search-and-download capability
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Resolve free text to ranked candidates; an empty list is a valid answer
    async fn search(&self, query: &str) -> Result<Vec<Candidate>>;

    /// Fetch the candidate's best available audio-only stream
    async fn fetch_audio(&self, candidate: &Candidate) -> Result<Bytes>;
}
