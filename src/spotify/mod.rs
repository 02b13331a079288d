//! Spotify Web API client module

pub mod auth;
pub mod client;
pub mod link;
pub mod models;

pub use auth::SpotifySession;
pub use client::SpotifyClient;
pub use link::parse_playlist_link;
pub use models::*;
