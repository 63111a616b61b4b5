use thiserror::Error;

/// Errors that can occur while querying the endpoint.
#[derive(Debug, Error)]
pub enum SparqlError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Endpoint returned error: {status} - {message}")]
    Endpoint { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Query timed out after {0}s")]
    Timeout(u64),
}

impl From<reqwest::Error> for SparqlError {
    fn from(err: reqwest::Error) -> Self {
        SparqlError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SparqlError {
    fn from(err: serde_json::Error) -> Self {
        SparqlError::Parse(err.to_string())
    }
}
