//! Per-item acquisition
//!
//! The worker resolves one search query against the provider and writes the
//! chosen candidate's audio to disk. Any error (provider unreachable, no
//! candidates, stream failure, write failure) degrades to a tagged `Failed`
//! outcome for that single item. Nothing unwinds past this boundary, so a
//! geo-blocked or deleted upstream video never aborts the batch.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::utils::sanitize_track_filename;
use crate::youtube::{Candidate, SearchProvider};

/// Why an item failed to download
#[derive(Debug, Clone, Error)]
pub enum FailureKind {
    #[error("no candidate: {0}")]
    NoCandidate(String),
    #[error("stream error: {0}")]
    Stream(String),
}

/// Outcome of one track-level unit of work
#[derive(Debug, Clone)]
pub enum TrackOutcome {
    /// Audio saved to disk
    Downloaded { path: PathBuf },
    /// Track removed from the catalog; nothing to do
    Skipped,
    /// Search or download failed; the batch continues
    Failed { query: String, kind: FailureKind },
}

/// Acquires single tracks from a search provider into an output directory
pub struct AcquisitionWorker<P: SearchProvider> {
    provider: Arc<P>,
    output_dir: PathBuf,
}

impl<P: SearchProvider> AcquisitionWorker<P> {
    pub fn new(provider: Arc<P>, output_dir: &Path) -> Self {
        Self {
            provider,
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// Search, select the first-ranked candidate, and save its audio as
    /// `"{index+1} - {artist} - {title}.mp3"`
    ///
    /// The numeric prefix preserves catalog order in the filesystem
    /// regardless of download completion order. This never returns an
    /// error; failures become a `TrackOutcome::Failed`.
    pub async fn acquire(&self, index: usize, query: &str, artist: &str, title: &str) -> TrackOutcome {
        let candidates = match self.provider.search(query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                return TrackOutcome::Failed {
                    query: query.to_string(),
                    kind: FailureKind::NoCandidate(format!("{:#}", e)),
                };
            }
        };

        let Some(candidate) = candidates.first() else {
            return TrackOutcome::Failed {
                query: query.to_string(),
                kind: FailureKind::NoCandidate("search returned no results".to_string()),
            };
        };

        // No secondary scoring: the provider's ranking decides.
        match self.download(index, candidate, artist, title).await {
            Ok(path) => TrackOutcome::Downloaded { path },
            Err(e) => TrackOutcome::Failed {
                query: query.to_string(),
                kind: FailureKind::Stream(format!("{:#}", e)),
            },
        }
    }

    async fn download(
        &self,
        index: usize,
        candidate: &Candidate,
        artist: &str,
        title: &str,
    ) -> Result<PathBuf> {
        let data = self.provider.fetch_audio(candidate).await?;

        let filename = format!("{} - {}", index + 1, sanitize_track_filename(artist, title));
        let path = self.output_dir.join(&filename);

        fs::write(&path, &data)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        debug!("Wrote track: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;

    /// Provider with scripted behavior per query
    struct MockProvider {
        /// Queries that return zero candidates
        empty_for: Vec<String>,
        /// Queries whose search call errors
        search_error_for: Vec<String>,
        /// Candidate ids whose audio fetch errors
        fetch_error_for: Vec<String>,
    }

    impl MockProvider {
        fn ok() -> Self {
            Self {
                empty_for: vec![],
                search_error_for: vec![],
                fetch_error_for: vec![],
            }
        }
    }

    #[async_trait]
    impl SearchProvider for MockProvider {
        async fn search(&self, query: &str) -> anyhow::Result<Vec<Candidate>> {
            if self.search_error_for.iter().any(|q| q == query) {
                anyhow::bail!("provider unreachable");
            }
            if self.empty_for.iter().any(|q| q == query) {
                return Ok(vec![]);
            }
            Ok(vec![
                Candidate {
                    id: format!("id:{}", query),
                    title: query.to_string(),
                    url: format!("https://example.com/watch?v={}", query),
                },
                Candidate {
                    id: "second-ranked".to_string(),
                    title: "should not be chosen".to_string(),
                    url: "https://example.com/second".to_string(),
                },
            ])
        }

        async fn fetch_audio(&self, candidate: &Candidate) -> anyhow::Result<Bytes> {
            if self.fetch_error_for.iter().any(|id| *id == candidate.id) {
                anyhow::bail!("stream extraction failed");
            }
            Ok(Bytes::from_static(b"audio-bytes"))
        }
    }

    fn temp_output_dir(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let dir = std::env::temp_dir().join(format!(
            "spotitube_test_{}_{}_{}",
            tag,
            std::process::id(),
            nanos
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_successful_acquisition_writes_prefixed_file() {
        let dir = temp_output_dir("ok");
        let worker = AcquisitionWorker::new(Arc::new(MockProvider::ok()), &dir);

        let outcome = worker
            .acquire(0, "Daft Punk - One More Time", "Daft Punk", "One More Time")
            .await;

        match outcome {
            TrackOutcome::Downloaded { path } => {
                assert_eq!(
                    path.file_name().unwrap().to_str().unwrap(),
                    "1 - Daft Punk - One More Time.mp3"
                );
                assert_eq!(std::fs::read(&path).unwrap(), b"audio-bytes");
            }
            other => panic!("expected Downloaded, got {:?}", other),
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_index_prefix_is_one_based() {
        let dir = temp_output_dir("prefix");
        let worker = AcquisitionWorker::new(Arc::new(MockProvider::ok()), &dir);

        let outcome = worker.acquire(9, "q", "Artist", "Title").await;
        match outcome {
            TrackOutcome::Downloaded { path } => {
                assert_eq!(
                    path.file_name().unwrap().to_str().unwrap(),
                    "10 - Artist - Title.mp3"
                );
            }
            other => panic!("expected Downloaded, got {:?}", other),
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_zero_candidates_is_a_failed_outcome() {
        let dir = temp_output_dir("empty");
        let provider = MockProvider {
            empty_for: vec!["gone".to_string()],
            ..MockProvider::ok()
        };
        let worker = AcquisitionWorker::new(Arc::new(provider), &dir);

        let outcome = worker.acquire(0, "gone", "a", "t").await;
        match outcome {
            TrackOutcome::Failed { query, kind } => {
                assert_eq!(query, "gone");
                assert!(matches!(kind, FailureKind::NoCandidate(_)));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_search_error_is_a_failed_outcome() {
        let dir = temp_output_dir("searcherr");
        let provider = MockProvider {
            search_error_for: vec!["down".to_string()],
            ..MockProvider::ok()
        };
        let worker = AcquisitionWorker::new(Arc::new(provider), &dir);

        let outcome = worker.acquire(0, "down", "a", "t").await;
        assert!(matches!(
            outcome,
            TrackOutcome::Failed {
                kind: FailureKind::NoCandidate(_),
                ..
            }
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_stream_error_is_a_failed_outcome() {
        let dir = temp_output_dir("streamerr");
        let provider = MockProvider {
            fetch_error_for: vec!["id:blocked".to_string()],
            ..MockProvider::ok()
        };
        let worker = AcquisitionWorker::new(Arc::new(provider), &dir);

        let outcome = worker.acquire(0, "blocked", "a", "t").await;
        match outcome {
            TrackOutcome::Failed { kind, .. } => {
                assert!(matches!(kind, FailureKind::Stream(_)));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_write_failure_is_a_failed_outcome() {
        // Point the worker at a directory that does not exist.
        let dir = std::env::temp_dir().join("spotitube_test_missing_dir_nope");
        let worker = AcquisitionWorker::new(Arc::new(MockProvider::ok()), &dir);

        let outcome = worker.acquire(0, "q", "a", "t").await;
        assert!(matches!(
            outcome,
            TrackOutcome::Failed {
                kind: FailureKind::Stream(_),
                ..
            }
        ));
    }
}
