use thiserror::Error;

/// Every way a backend call can fail. Call sites in the UI layer treat all
/// variants as one "request failed" branch; the split exists for logging.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("response from {endpoint} is missing `{field}`")]
    MissingField { endpoint: String, field: &'static str },

    #[error("failed to build HTTP client: {0}")]
    Setup(#[source] reqwest::Error),
}

impl ClientError {
    pub fn transport(endpoint: &str, source: reqwest::Error) -> Self {
        ClientError::Transport {
            endpoint: endpoint.to_string(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }

    /// HTTP status for non-2xx responses.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
