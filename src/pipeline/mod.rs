//! Track acquisition pipeline

pub mod engine;
pub mod queries;
pub mod worker;

pub use engine::{BatchEngine, BatchProgress, BatchSummary};
pub use queries::build_queries;
pub use worker::{AcquisitionWorker, FailureKind, TrackOutcome};
