use thiserror::Error;

/// Errors that can occur while producing suggestions
#[derive(Debug, Error)]
pub enum SuggestError {
    /// Network failure or non-success HTTP status from the search backend
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with an API error object
    #[error("API error ({code}): {info}")]
    Api { code: String, info: String },

    /// The backend response could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// A request observed its cancellation token
    #[error("Lookup cancelled")]
    Cancelled,

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SuggestError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SuggestError::Parse(e.to_string())
        } else {
            SuggestError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
