//! Rarible marketplace adapter.

use super::adapter::{directional_request, failure_message, Direction, PlatformAdapter};
use crate::config::PlatformEndpoint;
use crate::error::ApiError;
use crate::transport::{fetch_json, HttpTransport, RequestMethod};
use crate::types::{ConnectionEntry, ConnectionEntryList, PlatformTag};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

// Missing fields decode as empty strings; the classifier then drops that record alone.
#[derive(Debug, Deserialize)]
struct RaribleConnectionResp {
    #[serde(default)]
    following: RaribleFollowing,
}

#[derive(Debug, Default, Deserialize)]
struct RaribleFollowing {
    #[serde(rename = "owner", default)]
    from: String,
    #[serde(rename = "user", default)]
    to: String,
}

#[derive(Debug, Serialize)]
struct PageRequest {
    size: u32,
}

pub struct RaribleAdapter {
    endpoint: PlatformEndpoint,
    transport: Arc<dyn HttpTransport>,
}

impl RaribleAdapter {
    pub fn new(endpoint: PlatformEndpoint, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    fn request_body(&self) -> Result<Option<Vec<u8>>, ApiError> {
        match (self.endpoint.method, self.endpoint.page_size) {
            (RequestMethod::Post, Some(size)) => {
                Ok(Some(serde_json::to_vec(&PageRequest { size })?))
            }
            _ => Ok(None),
        }
    }

    async fn fetch_direction(
        &self,
        address: &str,
        direction: Direction,
    ) -> Result<Vec<RaribleConnectionResp>, ApiError> {
        let request = directional_request(&self.endpoint, direction, address, self.request_body()?);
        let records: Vec<RaribleConnectionResp> =
            fetch_json(self.transport.as_ref(), request).await?;
        debug!(
            platform = %PlatformTag::Rarible,
            direction = %direction,
            records = records.len(),
            "Rarible page fetched"
        );
        Ok(records)
    }
}

#[async_trait]
impl PlatformAdapter for RaribleAdapter {
    fn platform(&self) -> PlatformTag {
        PlatformTag::Rarible
    }

    async fn fetch_edges(&self, address: &str) -> ConnectionEntryList {
        let followings = match self.fetch_direction(address, Direction::Following).await {
            Ok(records) => records,
            Err(e) => {
                return ConnectionEntryList::failure(
                    PlatformTag::Rarible,
                    e,
                    failure_message(PlatformTag::Rarible, Direction::Following),
                )
            }
        };
        let followers = match self.fetch_direction(address, Direction::Followers).await {
            Ok(records) => records,
            Err(e) => {
                return ConnectionEntryList::failure(
                    PlatformTag::Rarible,
                    e,
                    failure_message(PlatformTag::Rarible, Direction::Followers),
                )
            }
        };

        // Both directions carry owner -> user; followers are listed first.
        let edges = followers
            .into_iter()
            .chain(followings)
            .filter_map(|record| {
                ConnectionEntry::new(record.following.from, record.following.to, PlatformTag::Rarible)
            })
            .collect();
        ConnectionEntryList::success(PlatformTag::Rarible, edges)
    }
}
