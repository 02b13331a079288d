//! Spotify client-credentials authentication
//!
//! Exchanges a client id/secret for a bearer token once per run. The
//! resulting session is immutable and passed explicitly to every pipeline
//! call; it is discarded when the run ends.

use anyhow::{Context, Result};
use tracing::debug;

use super::models::TokenResponse;

const TOKEN_ENDPOINT: &str = "https://accounts.spotify.com/api/token";

/// An authenticated Spotify session
#[derive(Debug, Clone)]
pub struct SpotifySession {
    authorization: String,
}

impl SpotifySession {
    /// Value for the `Authorization` request header, `"{token_type} {access_token}"`
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            authorization: "Bearer test-token".to_string(),
        }
    }
}

/// Exchange client credentials for an access token
pub async fn authenticate(client_id: &str, client_secret: &str) -> Result<SpotifySession> {
    debug!("Requesting client-credentials token from {}", TOKEN_ENDPOINT);

    let client = reqwest::Client::new();
    let response = client
        .post(TOKEN_ENDPOINT)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ])
        .send()
        .await
        .context("Failed to reach the Spotify token endpoint")?;

    if !response.status().is_success() {
        anyhow::bail!(
            "Spotify rejected the credentials (status {})",
            response.status()
        );
    }

    let token: TokenResponse = response
        .json()
        .await
        .context("Failed to parse token response")?;

    debug!("Obtained {} token", token.token_type);
    Ok(SpotifySession {
        authorization: format!("{} {}", token.token_type, token.access_token),
    })
}
