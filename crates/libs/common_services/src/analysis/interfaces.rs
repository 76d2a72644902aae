use crate::analysis::error::ValidationError;
use crate::utils::{candidate_limit, playlist_id_from_url};
use common_types::{AnalysisResult, CandidateSource, ColorCode, ColorCodeError};
use std::fmt;
use tokio::time::Instant;

/// Lifecycle of one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    FetchingCandidates,
    Analyzing,
    Completed,
    Failed,
    TimedOut,
    /// A newer build took over before this one finished.
    Superseded,
}

/// The remote call a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    FetchingCandidates,
    Analyzing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchingCandidates => f.write_str("Fetching tracks"),
            Self::Analyzing => f.write_str("Analysis"),
        }
    }
}

/// A validated build request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub color: ColorCode,
    pub source: CandidateSource,
    pub playlist_url: Option<String>,
    /// Limit sent to the service, already mapped from the user's value.
    pub limit: u32,
}

impl BuildRequest {
    /// Validate raw user input. `consider` is the user's candidate cap, `0` for no cap.
    pub fn from_input(
        raw_color: &str,
        source: CandidateSource,
        playlist_url: Option<&str>,
        consider: u32,
    ) -> Result<Self, ValidationError> {
        let color = raw_color.parse::<ColorCode>().map_err(|e| match e {
            ColorCodeError::Empty => ValidationError::MissingColorCode,
            ColorCodeError::Invalid(text) => ValidationError::InvalidColorCode(text),
        })?;

        let playlist_url = if source.requires_locator() {
            let url = playlist_url
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .ok_or(ValidationError::MissingLocator)?;
            if playlist_id_from_url(url).is_none() {
                return Err(ValidationError::InvalidLocator(url.to_string()));
            }
            Some(url.to_string())
        } else {
            None
        };

        Ok(Self {
            color,
            source,
            playlist_url,
            limit: candidate_limit(consider),
        })
    }
}

/// Transient state of one build, from request to terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSession {
    pub id: u64,
    pub color: ColorCode,
    pub started_at: Instant,
    pub state: SessionState,
    /// Candidate count, known once fetched.
    pub total: usize,
    /// Simulated progress, never above `total`.
    pub analyzed: usize,
}

/// Ranked results of a finished build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutcome {
    pub session_id: u64,
    pub color: ColorCode,
    /// Candidates that were sent for analysis.
    pub considered: usize,
    pub results: Vec<AnalysisResult>,
}
