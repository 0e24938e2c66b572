use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Login rejected by the NAS
    #[error("Login failed: {0}")]
    NasAuth(String),

    #[error("Failed to add magnet link to Download Station: {0}")]
    NasSubmission(String),

    /// Body of a NAS response could not be decoded
    #[error("Unexpected NAS response: {0}")]
    NasResponse(String),
}

impl Error {
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// True for connection-level failures (timeouts, DNS, refused connections)
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}
