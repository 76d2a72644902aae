//! JSON bodies exchanged with the remote color-playlist service.
use crate::{AnalysisResult, CandidateSource, ColorCode, Track};
use serde::{Deserialize, Serialize};

/// `POST /fetch-tracks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTracksRequest {
    pub source: CandidateSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_url: Option<String>,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FetchTracksResponse {
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// `POST /analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub hex: ColorCode,
    /// Similarity floor applied by the service.
    pub threshold: f64,
    pub tracks: Vec<Track>,
}

/// Results come back sorted ascending by distance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub results: Vec<AnalysisResult>,
    #[serde(default)]
    pub hex: Option<String>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub total: Option<usize>,
}

/// `POST /build`: creates the collection from the selected tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildPlaylistRequest {
    pub hex: ColorCode,
    pub threshold: f64,
    pub tracks: Vec<Track>,
    pub top_n: usize,
    pub playlist_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlaylistResponse {
    #[serde(default)]
    pub playlist_id: Option<String>,
    /// Link to the created collection. The service may not know one.
    #[serde(default)]
    pub playlist_url: Option<String>,
    /// Items actually added, as reported by the service.
    pub added: usize,
    #[serde(default)]
    pub considered: Option<usize>,
    #[serde(default)]
    pub hex: Option<String>,
}
