use crate::api_client::ApiClientError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    /// Nothing is selected. Raised before any remote call.
    #[error("Nothing to save")]
    NothingSelected,

    #[error("Creating the playlist failed: {0}")]
    Network(#[from] ApiClientError),

    #[error("Creating the playlist timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl SaveError {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NothingSelected => self.to_string(),
            Self::Network(e) => e.user_message(),
            Self::Timeout(_) => {
                "Creating the playlist timed out. Check your connection and try again.".to_string()
            }
        }
    }
}
