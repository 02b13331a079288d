//! Playlist link validation
//!
//! Only links of the form `https://open.spotify.com/playlist/<22-char id>`
//! are accepted, and rejection happens before any network call is made.

use thiserror::Error;

/// Required prefix of a shareable playlist link
pub const PLAYLIST_LINK_PREFIX: &str = "https://open.spotify.com/playlist/";

/// Length of a Spotify base-62 resource id
const PLAYLIST_ID_LEN: usize = 22;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("not a Spotify playlist link (expected it to start with {PLAYLIST_LINK_PREFIX})")]
    InvalidPrefix,
    #[error("malformed playlist id in link")]
    MalformedId,
}

/// Extract the playlist id from a shareable link
///
/// Trailing path segments or query strings after the id (share links carry a
/// `?si=` tracking parameter) are tolerated and ignored.
pub fn parse_playlist_link(link: &str) -> Result<String, LinkError> {
    let rest = link
        .strip_prefix(PLAYLIST_LINK_PREFIX)
        .ok_or(LinkError::InvalidPrefix)?;

    // get() instead of slicing: byte index 22 may fall inside a multi-byte
    // character on a garbage link, which must reject rather than panic.
    let id = rest.get(..PLAYLIST_ID_LEN).ok_or(LinkError::MalformedId)?;
    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(LinkError::MalformedId);
    }

    Ok(id.to_string())
}
