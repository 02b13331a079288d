//! Batch orchestration
//!
//! Drives every playlist slot through the acquisition worker and reports
//! progress after each item. Items are independent: one failure never
//! cancels in-flight siblings, and the batch always runs to the end of the
//! track list.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use futures::stream::{self, StreamExt};
use tokio::sync::mpsc;
use tracing::info;

use crate::pipeline::queries::build_queries;
use crate::pipeline::worker::{AcquisitionWorker, TrackOutcome};
use crate::spotify::{PlaylistSummary, SpotifyClient, Track};
use crate::youtube::SearchProvider;

/// Progress events emitted during a batch run
///
/// Sent over an mpsc channel; the single receiver owns the visible progress
/// state, so updates are serialized and `completed` is non-decreasing even
/// when acquisitions run concurrently.
#[derive(Debug, Clone)]
pub enum BatchProgress {
    /// Batch is about to process `total` slots
    Started { playlist: String, total: usize },
    /// An item's query is being resolved; `query` is the current label.
    /// Skipped slots never produce this event.
    ItemStarted { index: usize, query: String },
    /// An item finished; `completed` counts every slot, skipped included
    ItemFinished {
        index: usize,
        outcome: TrackOutcome,
        completed: usize,
        total: usize,
    },
    /// All slots processed
    Finished {
        downloaded: usize,
        skipped: usize,
        failed: usize,
    },
}

/// Tally of a completed batch, outcomes in catalog order
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub outcomes: Vec<(usize, TrackOutcome)>,
}

/// Orchestrates fetching, query building, and per-item acquisition
pub struct BatchEngine<P: SearchProvider> {
    spotify: SpotifyClient,
    provider: Arc<P>,
    parallel: usize,
}

impl<P: SearchProvider + 'static> BatchEngine<P> {
    /// Create an engine with a bounded acquisition concurrency
    ///
    /// `parallel = 1` reproduces strict catalog-order processing; higher
    /// values cap concurrent provider calls so its rate limits are
    /// respected.
    pub fn new(spotify: SpotifyClient, provider: P, parallel: usize) -> Self {
        Self {
            spotify,
            provider: Arc::new(provider),
            parallel: parallel.max(1),
        }
    }

    /// Fetch the playlist's tracks and acquire all of them into `output_dir`
    pub async fn run(
        &self,
        playlist_id: &str,
        playlist: &PlaylistSummary,
        output_dir: &Path,
        progress_tx: mpsc::Sender<BatchProgress>,
    ) -> Result<BatchSummary> {
        let tracks = self
            .spotify
            .playlist_tracks(playlist_id, playlist.total)
            .await?;

        self.acquire_all(&playlist.name, tracks, output_dir, progress_tx)
            .await
    }

    async fn acquire_all(
        &self,
        playlist_name: &str,
        tracks: Vec<Option<Track>>,
        output_dir: &Path,
        progress_tx: mpsc::Sender<BatchProgress>,
    ) -> Result<BatchSummary> {
        let queries = build_queries(&tracks);
        let total = queries.len();

        info!("Starting batch of {} tracks for '{}'", total, playlist_name);
        let _ = progress_tx
            .send(BatchProgress::Started {
                playlist: playlist_name.to_string(),
                total,
            })
            .await;

        let worker = Arc::new(AcquisitionWorker::new(self.provider.clone(), output_dir));

        let items = queries
            .into_iter()
            .zip(tracks)
            .enumerate()
            .map(|(index, (query, track))| {
                let worker = worker.clone();
                let tx = progress_tx.clone();
                async move {
                    let (Some(query), Some(track)) = (query, track) else {
                        // Removed track: no label update, no provider call.
                        return (index, TrackOutcome::Skipped);
                    };

                    let _ = tx
                        .send(BatchProgress::ItemStarted {
                            index,
                            query: query.clone(),
                        })
                        .await;

                    let artist = track.first_artist().unwrap_or_default();
                    let outcome = worker.acquire(index, &query, artist, &track.name).await;
                    (index, outcome)
                }
            });

        let mut in_flight = stream::iter(items).buffer_unordered(self.parallel);

        // Single driving loop: the only writer of the completed count.
        let mut summary = BatchSummary::default();
        let mut completed = 0;
        while let Some((index, outcome)) = in_flight.next().await {
            completed += 1;
            match &outcome {
                TrackOutcome::Downloaded { .. } => summary.downloaded += 1,
                TrackOutcome::Skipped => summary.skipped += 1,
                TrackOutcome::Failed { .. } => summary.failed += 1,
            }

            let _ = progress_tx
                .send(BatchProgress::ItemFinished {
                    index,
                    outcome: outcome.clone(),
                    completed,
                    total,
                })
                .await;
            summary.outcomes.push((index, outcome));
        }

        summary.outcomes.sort_by_key(|(index, _)| *index);

        info!(
            "Batch complete: {} downloaded, {} skipped, {} failed",
            summary.downloaded, summary.skipped, summary.failed
        );
        let _ = progress_tx
            .send(BatchProgress::Finished {
                downloaded: summary.downloaded,
                skipped: summary.skipped,
                failed: summary.failed,
            })
            .await;

        Ok(summary)
    }
}
