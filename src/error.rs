//! Error types for repository search
//!
//! Every variant is recoverable: the controller reports it and stays ready
//! for the next attempt.

use thiserror::Error;

/// Main error type for search operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Please enter a search term.")]
    EmptyQuery,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Malformed search response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// Build a status error, preferring the message the API put in the body.
    pub fn from_status(status: u16, api_message: Option<String>) -> Self {
        let message = match api_message {
            Some(m) if !m.trim().is_empty() => m,
            _ => format!("Request failed with status code {}", status),
        };
        SearchError::Status { status, message }
    }

    /// True for anything that went wrong talking to the search API
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            SearchError::Transport(_)
                | SearchError::Status { .. }
                | SearchError::MalformedResponse(_)
        )
    }
}
