use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An item from the candidate pool. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    /// Identity used when committing a collection.
    pub uri: String,
    #[serde(default)]
    pub name: String,
    /// Display label, already joined by the service (`"A, B"`).
    #[serde(default)]
    pub artists: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A track scored against the target color by the remote analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub track: Track,
    /// 0 is an exact match, larger is less similar.
    pub distance: f64,
    /// Dominant color the service derived for the track's artwork, if it reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant: Option<[u8; 3]>,
}

impl AnalysisResult {
    /// `100 - distance`, clamped into `[0, 100]`.
    #[must_use]
    pub fn similarity(&self) -> f64 {
        similarity_from_distance(self.distance)
    }
}

#[must_use]
pub fn similarity_from_distance(distance: f64) -> f64 {
    (100.0 - distance).clamp(0.0, 100.0)
}

/// Which pool candidates are fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    /// The user's saved tracks.
    #[default]
    Liked,
    /// An existing playlist, identified by its URL.
    Playlist,
}

impl CandidateSource {
    /// Whether a locator (playlist URL) must accompany the request.
    #[must_use]
    pub const fn requires_locator(self) -> bool {
        matches!(self, Self::Playlist)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Liked => "liked",
            Self::Playlist => "playlist",
        }
    }
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown candidate source: {0}")]
pub struct UnknownSourceError(pub String);

impl FromStr for CandidateSource {
    type Err = UnknownSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "liked" => Ok(Self::Liked),
            "playlist" => Ok(Self::Playlist),
            other => Err(UnknownSourceError(other.to_string())),
        }
    }
}
