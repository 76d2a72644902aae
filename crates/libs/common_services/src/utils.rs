use app_state::{MIN_CANDIDATES, UNLIMITED_CANDIDATES};
use regex::Regex;
use std::sync::LazyLock;

static PLAYLIST_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"playlist/([a-zA-Z0-9]+)").expect("playlist id pattern is valid")
});

/// Extract the playlist id from a share link such as
/// `https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc`.
#[must_use]
pub fn playlist_id_from_url(url: &str) -> Option<&str> {
    PLAYLIST_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Map the user's "consider at most" value to the limit sent to the service.
/// `0` means no limit.
#[must_use]
pub fn candidate_limit(consider: u32) -> u32 {
    if consider == 0 {
        UNLIMITED_CANDIDATES
    } else {
        consider.max(MIN_CANDIDATES)
    }
}
