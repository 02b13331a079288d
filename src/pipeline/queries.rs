//! Search query derivation
//!
//! The query list is strictly parallel to the track list: index `i` of the
//! output always refers to the same playlist slot as index `i` of the input,
//! which is what lets the worker pair a query back to its artist/title for
//! filename construction.

use crate::spotify::Track;

/// Derive one search query per playlist slot
///
/// A present track yields `"{first artist} - {title}"`. A removed track
/// yields `None` at the same index. A track with no listed artists cannot
/// form a query either and is treated like a removed one.
pub fn build_queries(tracks: &[Option<Track>]) -> Vec<Option<String>> {
    tracks
        .iter()
        .map(|slot| {
            let track = slot.as_ref()?;
            let artist = track.first_artist()?;
            Some(format!("{} - {}", artist, track.name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(artist: &str, title: &str) -> Option<Track> {
        serde_json::from_str(&format!(
            r#"{{"name": "{}", "artists": [{{"name": "{}"}}, {{"name": "Someone Else"}}]}}"#,
            title, artist
        ))
        .unwrap()
    }

    #[test]
    fn test_query_uses_first_artist_only() {
        let queries = build_queries(&[track("Daft Punk", "One More Time")]);
        assert_eq!(queries, vec![Some("Daft Punk - One More Time".to_string())]);
    }

    #[test]
    fn test_length_and_index_alignment() {
        let tracks = vec![
            track("Daft Punk", "One More Time"),
            None,
            track("Justice", "D.A.N.C.E."),
        ];
        let queries = build_queries(&tracks);

        assert_eq!(queries.len(), tracks.len());
        for (slot, query) in tracks.iter().zip(&queries) {
            assert_eq!(slot.is_none(), query.is_none());
        }
        assert_eq!(queries[2].as_deref(), Some("Justice - D.A.N.C.E."));
    }

    #[test]
    fn test_artistless_track_yields_none() {
        let artistless: Option<Track> =
            Some(serde_json::from_str(r#"{"name": "Untitled"}"#).unwrap());
        assert_eq!(build_queries(&[artistless]), vec![None]);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_queries(&[]).is_empty());
    }
}
