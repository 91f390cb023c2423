//! Typed errors for the API transport and the report renderer.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single YouTube Data API call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http { status, message: message.into() }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }

    /// The commentThreads endpoint answers 403 for videos with comments turned off.
    pub fn is_comments_disabled(&self) -> bool {
        self.status() == Some(403)
    }
}

/// Why an HTML report could not be produced.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("error parsing JSON {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
    #[error("no comments found in {}", .0.display())]
    Empty(PathBuf),
    #[error("error saving HTML file {}: {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },
}
