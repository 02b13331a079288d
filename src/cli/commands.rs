//! CLI command handlers

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::generate;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use super::AuthManager;
use crate::pipeline::{BatchEngine, BatchProgress, TrackOutcome};
use crate::spotify::{self, SpotifyClient, parse_playlist_link};
use crate::utils::sanitize_dir_name;
use crate::youtube::YtDlpProvider;

/// Handle the `auth` command
pub async fn auth(
    client_id: Option<String>,
    client_secret: Option<String>,
    force: bool,
    clear: bool,
) -> Result<()> {
    if clear {
        AuthManager::clear()?;
        println!("{}", "Credentials removed from keyring.".green());
        return Ok(());
    }

    println!("{}", "Configuring Spotify credentials...".cyan());

    let creds = AuthManager::authenticate(client_id, client_secret, force).await?;

    println!();
    println!("{}", "Authentication successful!".green().bold());
    println!("  Client id: {}", creds.client_id);
    println!();
    println!("Credentials stored securely in system keyring.");

    Ok(())
}

/// Handle the `download` command
pub async fn download(
    link: String,
    dest: PathBuf,
    parallel: usize,
    ytdlp_path: String,
) -> Result<()> {
    // Link validation happens before any network call.
    let playlist_id = parse_playlist_link(&link)?;

    let creds = AuthManager::load().map_err(|_| {
        anyhow::anyhow!("No credentials found. Run 'spotitube auth' first to configure.")
    })?;

    println!("{}", "Authenticating with Spotify...".cyan());
    let session = spotify::auth::authenticate(&creds.client_id, &creds.client_secret).await?;
    let client = SpotifyClient::new(session)?;

    let playlist = client.playlist(&playlist_id).await?;
    println!(
        "Playlist {} ({} tracks)",
        playlist.name.green().bold(),
        playlist.total
    );

    // One directory per run; merging into a previous partial run would be
    // ambiguous, so an existing directory is fatal before anything starts.
    let output_dir = dest.join(sanitize_dir_name(&playlist.name));
    if output_dir.exists() {
        anyhow::bail!("Directory already exists: {}", output_dir.display());
    }
    tokio::fs::create_dir_all(&output_dir)
        .await
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let provider = YtDlpProvider::with_ytdlp_path(&ytdlp_path)?;
    let engine = BatchEngine::new(client, provider, parallel);

    let (progress_tx, progress_rx) = mpsc::channel(32);
    let run_dir = output_dir.clone();
    let run_playlist = playlist.clone();
    let handle = tokio::spawn(async move {
        engine
            .run(&playlist_id, &run_playlist, &run_dir, progress_tx)
            .await
    });

    render_progress(progress_rx).await;

    let summary = handle.await.context("Batch task panicked")??;

    println!();
    println!("{}", "Download completed!".green().bold());
    println!(
        "  {} downloaded, {} skipped, {} failed",
        summary.downloaded.to_string().green(),
        summary.skipped.to_string().yellow(),
        summary.failed.to_string().red()
    );
    println!("  Saved to {}", output_dir.display());

    if summary.failed > 0 {
        println!();
        println!("{}", "Failed tracks:".red().bold());
        for (index, outcome) in &summary.outcomes {
            if let TrackOutcome::Failed { query, kind } = outcome {
                println!("  {:>3}. {} ({})", index + 1, query, kind);
            }
        }
    }

    Ok(())
}

/// Render engine progress events on a terminal progress bar
async fn render_progress(mut progress_rx: mpsc::Receiver<BatchProgress>) {
    let mut bar: Option<ProgressBar> = None;

    while let Some(event) = progress_rx.recv().await {
        match event {
            BatchProgress::Started { total, .. } => {
                let pb = ProgressBar::new(total as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                        .unwrap()
                        .progress_chars("#>-"),
                );
                bar = Some(pb);
            }
            BatchProgress::ItemStarted { query, .. } => {
                if let Some(pb) = &bar {
                    pb.set_message(format!("Downloading: {}", query));
                }
            }
            BatchProgress::ItemFinished {
                outcome, completed, ..
            } => {
                if let Some(pb) = &bar {
                    pb.set_position(completed as u64);
                    if let TrackOutcome::Failed { query, kind } = &outcome {
                        pb.println(format!(
                            "{} {} ({})",
                            "Failed to download:".yellow(),
                            query,
                            kind
                        ));
                    }
                }
            }
            BatchProgress::Finished { .. } => {
                if let Some(pb) = &bar {
                    pb.finish_with_message("Done");
                }
            }
        }
    }
}

/// Handle the `completion` command
pub fn completion(shell: clap_complete::Shell) {
    let mut cmd = super::Cli::command();
    generate(shell, &mut cmd, "spotitube", &mut io::stdout());
}
