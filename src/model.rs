// Core structs: ProfileRequest, ProfileStats, fetch errors
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest upstream body kept on an `Upstream` error.
pub const BODY_SNIPPET_CHARS: usize = 512;

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRequest {
    pub username: String,
}

impl ProfileRequest {
    /// Returns the username without surrounding whitespace, or `None` if it is blank.
    pub fn username(&self) -> Option<&str> {
        let username = self.username.trim();
        if username.is_empty() {
            None
        } else {
            Some(username)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub total_solved: u64,
    pub contest_rating: u64,
    pub profile_url: String,
}

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

/// No HTTP response was obtained.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("User '{0}' not found")]
    NotFound(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("Failed to fetch profile stats: {0}")]
    Internal(String),
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => FetchError::Timeout,
            TransportError::Other(msg) => FetchError::Internal(msg),
        }
    }
}

/// Cuts `body` down to at most `BODY_SNIPPET_CHARS` characters.
pub fn body_snippet(body: &str) -> String {
    match body.char_indices().nth(BODY_SNIPPET_CHARS) {
        Some((idx, _)) => body[..idx].to_string(),
        None => body.to_string(),
    }
}
