//! Configuration
//!
//! Layered configuration for the indexer: struct defaults, an optional global
//! file, an optional workspace file (or an explicit path) and `INDEXER__*`
//! environment variables, merged with the `config` crate.

pub mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::transport::RequestMethod;
use serde::{Deserialize, Serialize};

/// Effective configuration for one indexer process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexerConfig {
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub platforms: PlatformsConfig,

    #[serde(default)]
    pub poap: PoapConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl IndexerConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.http.timeout_secs == 0 {
            return Err(ApiError::ConfigError(
                "http.timeout_secs must be greater than zero".to_string(),
            ));
        }
        self.platforms.context.validate("context")?;
        self.platforms.rarible.validate("rarible")?;
        self.poap.validate()
    }
}

/// Settings for the shared HTTP client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout; the only time bound on a fetch
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("social-indexer/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Request shape for one platform: both directions share method and page size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEndpoint {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// URL template for accounts the address follows; `{address}` is substituted
    pub following_url: String,

    /// URL template for accounts following the address
    pub follower_url: String,

    pub method: RequestMethod,

    /// Fixed page size sent as `{"size": n}` in a POST body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

fn default_true() -> bool {
    true
}

impl PlatformEndpoint {
    fn validate(&self, name: &str) -> Result<(), ApiError> {
        if !self.enabled {
            return Ok(());
        }
        for (field, url) in [
            ("following_url", &self.following_url),
            ("follower_url", &self.follower_url),
        ] {
            if !has_http_scheme(url) {
                return Err(ApiError::ConfigError(format!(
                    "platforms.{}.{} must be an http(s) URL, got {}",
                    name, field, url
                )));
            }
            if !url.contains("{address}") {
                return Err(ApiError::ConfigError(format!(
                    "platforms.{}.{} is missing the {{address}} placeholder",
                    name, field
                )));
            }
        }
        if self.page_size == Some(0) {
            return Err(ApiError::ConfigError(format!(
                "platforms.{}.page_size must be positive",
                name
            )));
        }
        Ok(())
    }
}

/// Registered connection sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformsConfig {
    #[serde(default = "default_context_endpoint")]
    pub context: PlatformEndpoint,

    #[serde(default = "default_rarible_endpoint")]
    pub rarible: PlatformEndpoint,
}

fn default_context_endpoint() -> PlatformEndpoint {
    PlatformEndpoint {
        enabled: true,
        following_url: "https://context.app/api/profile/{address}/following".to_string(),
        follower_url: "https://context.app/api/profile/{address}/followers".to_string(),
        method: RequestMethod::Get,
        page_size: None,
    }
}

fn default_rarible_endpoint() -> PlatformEndpoint {
    PlatformEndpoint {
        enabled: true,
        following_url:
            "https://api-mainnet.rarible.com/marketplace/api/v4/followings?owner={address}"
                .to_string(),
        follower_url: "https://api-mainnet.rarible.com/marketplace/api/v4/followers?user={address}"
            .to_string(),
        method: RequestMethod::Post,
        page_size: Some(5000),
    }
}

impl Default for PlatformsConfig {
    fn default() -> Self {
        Self {
            context: default_context_endpoint(),
            rarible: default_rarible_endpoint(),
        }
    }
}

/// What the recommender does when one event's co-attendee query fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoAttendeeFailurePolicy {
    /// Stop and return nothing, discarding records from earlier events
    #[default]
    Abort,
    /// Stop and return the records gathered before the failing event
    Truncate,
    /// Log the failing event and continue with the next one
    Skip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoapConfig {
    /// Attendance scan endpoint; `{address}` is substituted
    #[serde(default = "default_scan_url")]
    pub scan_url: String,

    /// GraphQL endpoint of the POAP subgraph
    #[serde(default = "default_subgraph_url")]
    pub subgraph_url: String,

    #[serde(default)]
    pub failure_policy: CoAttendeeFailurePolicy,
}

fn default_scan_url() -> String {
    "https://api.poap.xyz/actions/scan/{address}".to_string()
}

fn default_subgraph_url() -> String {
    "https://api.thegraph.com/subgraphs/name/poap-xyz/poap".to_string()
}

impl Default for PoapConfig {
    fn default() -> Self {
        Self {
            scan_url: default_scan_url(),
            subgraph_url: default_subgraph_url(),
            failure_policy: CoAttendeeFailurePolicy::default(),
        }
    }
}

impl PoapConfig {
    fn validate(&self) -> Result<(), ApiError> {
        if !has_http_scheme(&self.scan_url) || !self.scan_url.contains("{address}") {
            return Err(ApiError::ConfigError(format!(
                "poap.scan_url must be an http(s) URL containing {{address}}, got {}",
                self.scan_url
            )));
        }
        if !has_http_scheme(&self.subgraph_url) {
            return Err(ApiError::ConfigError(format!(
                "poap.subgraph_url must be an http(s) URL, got {}",
                self.subgraph_url
            )));
        }
        Ok(())
    }
}

fn has_http_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
