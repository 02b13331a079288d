//! CLI module for spotitube

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod auth;
pub mod commands;

pub use auth::AuthManager;

#[derive(Parser, Debug)]
#[command(name = "spotitube", about = "Download Spotify playlists as audio files via YouTube")]
#[command(version, author)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure Spotify API credentials
    Auth {
        /// Spotify application client id
        #[arg(long, env = "SPOTIFY_CLIENT_ID")]
        client_id: Option<String>,

        /// Spotify application client secret
        #[arg(long, env = "SPOTIFY_CLIENT_SECRET")]
        client_secret: Option<String>,

        /// Force re-authentication (ignore stored credentials)
        #[arg(long)]
        force: bool,

        /// Remove stored credentials and exit
        #[arg(long, conflicts_with_all = ["client_id", "client_secret", "force"])]
        clear: bool,
    },

    /// Download a playlist's tracks as audio files
    Download {
        /// Playlist share link (https://open.spotify.com/playlist/...)
        #[arg(value_name = "LINK")]
        link: String,

        /// Directory the playlist folder is created under
        #[arg(value_name = "DEST")]
        dest: PathBuf,

        /// Number of concurrent downloads
        #[arg(short, long, default_value = "1")]
        parallel: usize,

        /// Path to the yt-dlp binary
        #[arg(long, default_value = "yt-dlp")]
        ytdlp_path: String,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
