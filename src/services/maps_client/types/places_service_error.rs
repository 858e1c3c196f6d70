use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacesServiceError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to send request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("provider responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to get response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl PlacesServiceError {
    pub fn from_send(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PlacesServiceError::Timeout(e)
        } else {
            PlacesServiceError::Transport(e)
        }
    }

    /// The client timeout also covers reading the body.
    pub fn from_body(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PlacesServiceError::Timeout(e)
        } else {
            PlacesServiceError::Decode(e)
        }
    }
}
