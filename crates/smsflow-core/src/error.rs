/// Error types for the smsflow relay
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Payload error: {0}")]
    Payload(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Route configuration error: {0}")]
    RouteConfig(String),

    #[error("Telephony API error: {0}")]
    Telephony(String),

    #[error("Email API error: {0}")]
    Email(String),

    #[error("Media fetch error: {0}")]
    Media(String),

    #[error("Signature verification failed: {0}")]
    Signature(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

impl RelayError {
    /// HTTP status the webhook gate answers with when this error reaches it
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Signature(_) => 401,
            _ => 500,
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

impl From<std::env::VarError> for RelayError {
    fn from(err: std::env::VarError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}
