//! Filesystem-safe track filenames

/// Characters that are invalid in filenames on at least one supported OS
const FORBIDDEN: [char; 8] = ['/', '?', ':', '"', '<', '>', '|', '\\'];

/// Build a filesystem-safe filename for a track
///
/// Concatenates as `"{artist} - {title}.mp3"` and strips forbidden
/// characters outright. Removal, not substitution: two names differing only
/// in forbidden characters collide, which is accepted (the caller prefixes
/// files with their playlist position, so collisions stay distinguishable).
///
/// # Examples
///
/// ```
/// use spotitube::utils::sanitize_track_filename;
///
/// assert_eq!(
///     sanitize_track_filename("Daft Punk", "One More Time"),
///     "Daft Punk - One More Time.mp3"
/// );
/// ```
pub fn sanitize_track_filename(artist: &str, title: &str) -> String {
    let name = format!("{} - {}.mp3", artist, title);
    name.chars().filter(|c| !FORBIDDEN.contains(c)).collect()
}

/// Strip forbidden characters from a directory name
///
/// Used for the per-run playlist directory; same removal policy as track
/// filenames.
pub fn sanitize_dir_name(name: &str) -> String {
    name.chars().filter(|c| !FORBIDDEN.contains(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_untouched() {
        assert_eq!(
            sanitize_track_filename("Daft Punk", "One More Time"),
            "Daft Punk - One More Time.mp3"
        );
    }

    #[test]
    fn test_forbidden_characters_removed_not_replaced() {
        assert_eq!(
            sanitize_track_filename("Haddaway", "Wh:at/Is \"Love\"?"),
            "Haddaway - WhatIs Love.mp3"
        );
    }

    #[test]
    fn test_output_never_contains_forbidden_characters() {
        let name = sanitize_track_filename("AC/DC", "T.N.T. <live> | B\\side?");
        assert!(!name.contains(|c| FORBIDDEN.contains(&c)));
    }

    #[test]
    fn test_documented_collision() {
        // Inputs differing only in forbidden characters reduce to the same name.
        assert_eq!(
            sanitize_track_filename("AC/DC", "Back in Black"),
            sanitize_track_filename("ACDC", "Back in Black"),
        );
    }

    #[test]
    fn test_dir_name() {
        assert_eq!(sanitize_dir_name("road trip: 2024"), "road trip 2024");
    }
}
