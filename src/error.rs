//! Error types shared by the fetch engine, configuration and CLI.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Network or HTTP client failure before a response body was read
    #[error("Transport error: {0}")]
    TransportError(String),

    /// Upstream answered with a non-success status
    #[error("Upstream returned HTTP {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    /// Response body does not match the expected shape
    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Stable category used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::TransportError(_) | ApiError::UpstreamStatus { .. } => "transport",
            ApiError::DecodeError(_) => "decode",
            ApiError::ConfigError(_) => "config",
            ApiError::InvalidAddress(_) => "validation",
            ApiError::Io(_) => "io",
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == "transport"
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::DecodeError(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ApiError::UpstreamStatus {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => ApiError::TransportError(err.to_string()),
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
