use crate::analysis::interfaces::{SessionState, Stage};
use crate::api_client::ApiClientError;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Input problems caught before any remote call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter a hex color")]
    MissingColorCode,

    #[error("Invalid hex color: {0}")]
    InvalidColorCode(String),

    #[error("Enter a playlist URL")]
    MissingLocator,

    #[error("Invalid playlist URL: {0}")]
    InvalidLocator(String),
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{stage} failed: {source}")]
    Network {
        stage: Stage,
        #[source]
        source: ApiClientError,
    },

    #[error("{stage} timed out after {}s", .after.as_secs())]
    Timeout { stage: Stage, after: Duration },

    #[error("Superseded by a newer build")]
    Superseded,
}

impl BuildError {
    /// Text for the status line. Timeouts read differently from other network failures.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Network { source, .. } => source.user_message(),
            Self::Timeout {
                stage: Stage::Analyzing,
                ..
            } => "Analysis timed out. Try with fewer tracks or check your connection.".to_string(),
            Self::Timeout {
                stage: Stage::FetchingCandidates,
                ..
            } => "Fetching tracks timed out. Check your connection.".to_string(),
            Self::Superseded => String::new(),
        }
    }

    /// Session state this error leaves the session in.
    #[must_use]
    pub const fn terminal_state(&self) -> SessionState {
        match self {
            Self::Validation(_) | Self::Network { .. } => SessionState::Failed,
            Self::Timeout { .. } => SessionState::TimedOut,
            Self::Superseded => SessionState::Superseded,
        }
    }
}

pub(crate) fn log_error(session_id: u64, error: &BuildError) {
    match error {
        BuildError::Validation(e) => warn!("Session {session_id}: rejected input: {e}"),
        BuildError::Network { stage, source } => {
            warn!("Session {session_id}: {stage} failed: {source}");
        }
        BuildError::Timeout { stage, after } => {
            warn!("Session {session_id}: {stage} timed out after {after:?}");
        }
        BuildError::Superseded => warn!("Session {session_id}: superseded by a newer build"),
    }
}
