use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {}: {text}", .status.as_u16())]
    UnexpectedStatus { status: StatusCode, text: String },

    #[error("Invalid backend url: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid session cookie: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl ApiClientError {
    /// Short text for the status line.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::UnexpectedStatus { status, .. } => format!("Error: HTTP {}", status.as_u16()),
            Self::Request(e) => format!("Error: {e}"),
            Self::Url(_) | Self::InvalidHeader(_) => format!("Error: {self}"),
        }
    }
}
