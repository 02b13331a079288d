//! yt-dlp backed search/download provider
//!
//! Searches run as `yt-dlp --dump-json --flat-playlist "ytsearchN:..."`,
//! which emits one JSON object per line. Audio resolution uses
//! `yt-dlp --get-url -f bestaudio` to obtain a direct stream URL, and the
//! body is then fetched over HTTP.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use super::provider::{Candidate, SearchProvider};

/// Results requested per search; only the first-ranked one is downloaded,
/// the extra lines tolerate the occasional unparsable entry
const SEARCH_RESULTS: usize = 5;

/// Flat-playlist search entry as dumped by yt-dlp
#[derive(Debug, Deserialize)]
struct SearchEntry {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Provider that shells out to a yt-dlp binary
pub struct YtDlpProvider {
    ytdlp_path: String,
    http_client: reqwest::Client,
}

impl YtDlpProvider {
    /// Create a provider using a specific yt-dlp binary
    pub fn with_ytdlp_path(path: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("spotitube/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            ytdlp_path: path.to_string(),
            http_client,
        })
    }

    async fn run_ytdlp(&self, args: &[&str]) -> Result<String> {
        debug!("Running {} {}", self.ytdlp_path, args.join(" "));

        let output = Command::new(&self.ytdlp_path)
            .args(args)
            .output()
            .await
            .with_context(|| format!("Failed to spawn {}", self.ytdlp_path))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("yt-dlp failed ({}): {}", output.status, stderr.trim());
        }

        String::from_utf8(output.stdout).context("yt-dlp produced non-UTF-8 output")
    }
}

#[async_trait]
impl SearchProvider for YtDlpProvider {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>> {
        let search_url = format!("ytsearch{}:{}", SEARCH_RESULTS, query);
        let stdout = self
            .run_ytdlp(&[
                "--dump-json",
                "--flat-playlist",
                "--no-warnings",
                &search_url,
            ])
            .await?;

        let candidates: Vec<Candidate> = stdout
            .lines()
            .filter_map(|line| serde_json::from_str::<SearchEntry>(line).ok())
            .map(|entry| {
                // Flat entries sometimes omit the URL field.
                let url = entry
                    .url
                    .unwrap_or_else(|| format!("https://www.youtube.com/watch?v={}", entry.id));
                Candidate {
                    id: entry.id,
                    title: entry.title.unwrap_or_default(),
                    url,
                }
            })
            .collect();

        debug!("Search '{}' returned {} candidates", query, candidates.len());
        Ok(candidates)
    }

    async fn fetch_audio(&self, candidate: &Candidate) -> Result<Bytes> {
        let stdout = self
            .run_ytdlp(&[
                "--get-url",
                "-f",
                "bestaudio",
                "--no-warnings",
                &candidate.url,
            ])
            .await
            .with_context(|| format!("No audio stream for '{}'", candidate.title))?;

        let stream_url = stdout
            .lines()
            .next()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .context("yt-dlp returned no stream URL")?;

        debug!("Downloading audio stream for '{}'", candidate.title);

        let response = self
            .http_client
            .get(stream_url)
            .send()
            .await
            .context("Failed to request audio stream")?
            .error_for_status()
            .context("Audio stream request failed")?;

        response
            .bytes()
            .await
            .context("Failed to read audio stream body")
    }
}
