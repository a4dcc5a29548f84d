//! Core record types produced by the connection and POAP engines.

use crate::error::ApiError;
use crate::identity::is_resolvable_identity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform an edge was sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformTag {
    Context,
    Rarible,
}

impl PlatformTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformTag::Context => "Context",
            PlatformTag::Rarible => "Rarible",
        }
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed "follows" edge between two identities on one platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConnectionEntry {
    from: String,
    to: String,
    platform: PlatformTag,
}

impl ConnectionEntry {
    /// Build an edge, or `None` when either endpoint is not a resolvable identity.
    pub fn new(from: impl Into<String>, to: impl Into<String>, platform: PlatformTag) -> Option<Self> {
        let from = from.into();
        let to = to.into();
        if !is_resolvable_identity(&from) || !is_resolvable_identity(&to) {
            return None;
        }
        Some(Self { from, to, platform })
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn platform(&self) -> PlatformTag {
        self.platform
    }
}

/// Result unit reported by one adapter task.
#[derive(Debug)]
pub struct ConnectionEntryList {
    pub platform: PlatformTag,
    pub outcome: Result<Vec<ConnectionEntry>, ApiError>,
    /// Diagnostic naming the adapter and direction that failed; empty on success.
    pub message: String,
}

impl ConnectionEntryList {
    pub fn success(platform: PlatformTag, entries: Vec<ConnectionEntry>) -> Self {
        Self {
            platform,
            outcome: Ok(entries),
            message: String::new(),
        }
    }

    pub fn failure(platform: PlatformTag, error: ApiError, message: impl Into<String>) -> Self {
        Self {
            platform,
            outcome: Err(error),
            message: message.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }
}

/// One proof-of-attendance token held by the queried address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPoapIdentity {
    pub event_id: String,
    pub event_desc: String,
    pub token_id: String,
    pub event_name: String,
    pub event_url: String,
}

/// Another holder of a token from an event the queried address attended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoapRecommendation {
    pub address: String,
    pub event_id: String,
    pub token_id: String,
}
