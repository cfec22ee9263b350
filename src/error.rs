use crate::common::PlacementError;

/// Failures surfaced by the client. None of them end the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Local check failed; nothing was sent.
    #[error("{0}")]
    Validation(#[from] PlacementError),
    /// The server rejected an HTTP request or it could not be delivered.
    #[error("{0}")]
    Request(String),
    /// The control channel failed at transport level.
    #[error("Control channel error: {0}")]
    Channel(String),
    /// The server cannot serve the control channel yet.
    #[error("{0}")]
    NotReady(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Request(err.to_string())
    }
}
