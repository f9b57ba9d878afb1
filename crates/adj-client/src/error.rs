//! Adjudicator API client error types.

/// Errors from adjudicator API calls.
///
/// A returned error always means the cached session and the local identity
/// were left untouched.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network, DNS, or timeout failure. No HTTP status is available.
    #[error("HTTP error calling {endpoint}: {source}")]
    Transport {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The backend returned a non-2xx status.
    #[error("adjudicator {endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
        /// The error body decoded as JSON, when it is JSON.
        detail: Option<serde_json::Value>,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The image attachment could not be encoded.
    #[error("invalid attachment {file_name}: {reason}")]
    Attachment { file_name: String, reason: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl ApiError {
    /// HTTP status of a rejected call, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
