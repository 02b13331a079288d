//! YouTube search/download provider module

pub mod provider;
pub mod ytdlp;

pub use provider::{Candidate, SearchProvider};
pub use ytdlp::YtDlpProvider;
