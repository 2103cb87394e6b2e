use thiserror::Error;

/// Failures of a single API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401. Callers drop the session and route back to sign-in.
    #[error("Session expired or invalid. Please sign in again.")]
    Unauthorized,
    /// Any other non-success status, carrying the server's message when it sent one.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Failed to call {call}: {source}")]
    Transport {
        call: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to parse {call} response: {source}")]
    Decode {
        call: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{call} did not return a session token")]
    MissingToken { call: String },
    #[error("Failed to build URL for {path}: {reason}")]
    InvalidUrl { path: String, reason: String },
}

impl ApiError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
