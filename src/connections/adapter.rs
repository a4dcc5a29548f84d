//! Platform adapter contract.

use crate::config::PlatformEndpoint;
use crate::transport::{render_url, HttpRequest};
use crate::types::{ConnectionEntryList, PlatformTag};
use async_trait::async_trait;
use std::fmt;

/// Which side of the relationship a request lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Accounts the queried address follows
    Following,
    /// Accounts that follow the queried address
    Followers,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Following => f.write_str("followings"),
            Direction::Followers => f.write_str("followers"),
        }
    }
}

/// Adapter for one connection source.
///
/// `fetch_edges` never returns an error directly: failures travel inside the
/// returned [`ConnectionEntryList`] so each adapter task reports exactly once.
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    fn platform(&self) -> PlatformTag;

    async fn fetch_edges(&self, address: &str) -> ConnectionEntryList;
}

/// Diagnostic attached to a failed list, e.g. `[rarible] fetch Rarible followers failed`.
pub fn failure_message(platform: PlatformTag, direction: Direction) -> String {
    format!(
        "[{}] fetch {} {} failed",
        platform.as_str().to_lowercase(),
        platform,
        direction
    )
}

/// Build the request for one direction of an endpoint.
pub fn directional_request(
    endpoint: &PlatformEndpoint,
    direction: Direction,
    address: &str,
    body: Option<Vec<u8>>,
) -> HttpRequest {
    let template = match direction {
        Direction::Following => &endpoint.following_url,
        Direction::Followers => &endpoint.follower_url,
    };
    HttpRequest::with_method(endpoint.method, render_url(template, address), body)
}
