//! HTTP transport port.
//!
//! Adapters never touch `reqwest` directly; they describe a request and hand
//! it to an [`HttpTransport`], which returns the raw body bytes.

pub mod reqwest_client;

pub use reqwest_client::ReqwestTransport;

use crate::error::ApiError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP method used by a platform endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    Get,
    Post,
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestMethod::Get => f.write_str("GET"),
            RequestMethod::Post => f.write_str("POST"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: RequestMethod,
    pub url: String,
    /// JSON body; only sent when present
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: RequestMethod::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: RequestMethod::Post,
            url: url.into(),
            body: Some(body),
        }
    }

    pub fn with_method(method: RequestMethod, url: impl Into<String>, body: Option<Vec<u8>>) -> Self {
        Self {
            method,
            url: url.into(),
            body,
        }
    }
}

/// Sends a request and returns the response body.
///
/// Shared read-only across concurrently running adapter tasks.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<Vec<u8>, ApiError>;
}

/// Send a request and decode the JSON body into `T`.
pub async fn fetch_json<T: DeserializeOwned>(
    transport: &dyn HttpTransport,
    request: HttpRequest,
) -> Result<T, ApiError> {
    let body = transport.send(request).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Substitute `{address}` in a URL template.
pub fn render_url(template: &str, address: &str) -> String {
    template.replace("{address}", address)
}
