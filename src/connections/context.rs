//! Context social-graph adapter.
//!
//! Context lists relationships by actor id. An actor may already be an
//! address, or may only be known through the embedded `profiles` map.

use super::adapter::{directional_request, failure_message, Direction, PlatformAdapter};
use crate::config::PlatformEndpoint;
use crate::error::ApiError;
use crate::identity::is_address;
use crate::transport::{fetch_json, HttpTransport};
use crate::types::{ConnectionEntry, ConnectionEntryList, PlatformTag};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ContextConnectionResp {
    #[serde(default)]
    relationships: Vec<ContextRelationship>,
    #[serde(default)]
    profiles: HashMap<String, Vec<ContextProfile>>,
}

#[derive(Debug, Deserialize)]
struct ContextRelationship {
    #[serde(default)]
    actor: String,
}

#[derive(Debug, Deserialize)]
struct ContextProfile {
    #[serde(default)]
    address: String,
}

impl ContextConnectionResp {
    fn profile_address(&self, actor: &str) -> Option<&str> {
        self.profiles
            .get(actor)
            .and_then(|entries| entries.first())
            .map(|profile| profile.address.as_str())
    }

    /// Following side: the actor itself when address-shaped, else its first profile.
    fn following_edges(&self, address: &str) -> Vec<ConnectionEntry> {
        self.relationships
            .iter()
            .filter_map(|rel| {
                let to = if is_address(&rel.actor) {
                    Some(rel.actor.as_str())
                } else {
                    self.profile_address(&rel.actor)
                };
                // Context has no address for this actor
                to.and_then(|to| ConnectionEntry::new(address, to, PlatformTag::Context))
            })
            .collect()
    }

    /// Follower side: only the profile map resolves an actor.
    fn follower_edges(&self, address: &str) -> Vec<ConnectionEntry> {
        self.relationships
            .iter()
            .filter_map(|rel| {
                self.profile_address(&rel.actor)
                    .and_then(|from| ConnectionEntry::new(from, address, PlatformTag::Context))
            })
            .collect()
    }
}

pub struct ContextAdapter {
    endpoint: PlatformEndpoint,
    transport: Arc<dyn HttpTransport>,
}

impl ContextAdapter {
    pub fn new(endpoint: PlatformEndpoint, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    async fn fetch_direction(
        &self,
        address: &str,
        direction: Direction,
    ) -> Result<Vec<ConnectionEntry>, ApiError> {
        let request = directional_request(&self.endpoint, direction, address, None);
        let resp: ContextConnectionResp = fetch_json(self.transport.as_ref(), request).await?;
        let edges = match direction {
            Direction::Following => resp.following_edges(address),
            Direction::Followers => resp.follower_edges(address),
        };
        debug!(
            platform = %PlatformTag::Context,
            direction = %direction,
            relationships = resp.relationships.len(),
            edges = edges.len(),
            "Context relationships normalized"
        );
        Ok(edges)
    }
}

#[async_trait]
impl PlatformAdapter for ContextAdapter {
    fn platform(&self) -> PlatformTag {
        PlatformTag::Context
    }

    async fn fetch_edges(&self, address: &str) -> ConnectionEntryList {
        let mut edges = Vec::new();
        for direction in [Direction::Following, Direction::Followers] {
            match self.fetch_direction(address, direction).await {
                Ok(found) => edges.extend(found),
                Err(e) => {
                    return ConnectionEntryList::failure(
                        PlatformTag::Context,
                        e,
                        failure_message(PlatformTag::Context, direction),
                    )
                }
            }
        }
        ConnectionEntryList::success(PlatformTag::Context, edges)
    }
}
