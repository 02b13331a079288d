//! Keyring-based credential storage for the Spotify API

use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use keyring::Entry;
use tracing::{debug, info};

const KEYRING_SERVICE: &str = "spotitube";

/// Spotify application credentials
#[derive(Debug, Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Manages authentication credentials storage
pub struct AuthManager;

impl AuthManager {
    /// Configure Spotify credentials
    ///
    /// Tries to load credentials from keyring first, or prompts for new
    /// ones. Verifies they are accepted by the token endpoint before
    /// storing.
    pub async fn authenticate(
        client_id: Option<String>,
        client_secret: Option<String>,
        force: bool,
    ) -> Result<SpotifyCredentials> {
        // Try to load existing credentials if not forcing re-auth
        if !force {
            if let Ok(creds) = Self::load() {
                info!("Found existing credentials in keyring");
                return Ok(creds);
            }
        } else {
            debug!("Force flag set, ignoring stored credentials");
        }

        // Prompt for missing values
        let client_id = client_id.unwrap_or_else(|| {
            Input::new()
                .with_prompt("Spotify client id")
                .interact_text()
                .expect("Failed to read client id")
        });

        let client_secret = client_secret.unwrap_or_else(|| {
            Password::new()
                .with_prompt("Spotify client secret")
                .interact()
                .expect("Failed to read client secret")
        });

        let creds = SpotifyCredentials {
            client_id,
            client_secret,
        };

        // Verify credentials work
        Self::verify(&creds).await?;

        // Store credentials
        Self::store(&creds)?;
        info!("Credentials stored in keyring");

        Ok(creds)
    }

    /// Load credentials from keyring
    pub fn load() -> Result<SpotifyCredentials> {
        let client_id = Self::get_entry("client_id")?
            .get_password()
            .context("No Spotify client id in keyring")?;

        let client_secret = Self::get_entry("client_secret")?
            .get_password()
            .context("No Spotify client secret in keyring")?;

        Ok(SpotifyCredentials {
            client_id,
            client_secret,
        })
    }

    /// Store credentials in keyring
    pub fn store(creds: &SpotifyCredentials) -> Result<()> {
        Self::get_entry("client_id")?
            .set_password(&creds.client_id)
            .context("Failed to store client id in keyring")?;

        Self::get_entry("client_secret")?
            .set_password(&creds.client_secret)
            .context("Failed to store client secret in keyring")?;

        debug!("Credentials stored in keyring");
        Ok(())
    }

    /// Clear stored credentials
    pub fn clear() -> Result<()> {
        let _ = Self::get_entry("client_id")?.delete_credential();
        let _ = Self::get_entry("client_secret")?.delete_credential();
        info!("Credentials cleared from keyring");
        Ok(())
    }

    /// Verify credentials by requesting a token
    async fn verify(creds: &SpotifyCredentials) -> Result<()> {
        debug!("Verifying credentials against the token endpoint");

        crate::spotify::auth::authenticate(&creds.client_id, &creds.client_secret)
            .await
            .context("Failed to verify credentials")?;

        info!("Credentials verified successfully");
        Ok(())
    }

    /// Get a keyring entry for a given key
    fn get_entry(key: &str) -> Result<Entry> {
        let entry_key = format!("spotify:{}", key);
        Entry::new(KEYRING_SERVICE, &entry_key).context("Failed to access keyring")
    }
}
