//! spotitube - Download Spotify playlists as audio files via YouTube

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod pipeline;
mod spotify;
mod utils;
mod youtube;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "spotitube=debug,reqwest=debug"
    } else {
        "spotitube=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Auth {
            client_id,
            client_secret,
            force,
            clear,
        } => {
            cli::commands::auth(client_id, client_secret, force, clear).await?;
        }
        Commands::Download {
            link,
            dest,
            parallel,
            ytdlp_path,
        } => {
            cli::commands::download(link, dest, parallel, ytdlp_path).await?;
        }
        Commands::Completion { shell } => {
            cli::commands::completion(shell);
        }
    }

    Ok(())
}
