//! Attendance listing via the POAP scan API.

use crate::error::ApiError;
use crate::transport::{fetch_json, render_url, HttpRequest, HttpTransport};
use crate::types::UserPoapIdentity;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Debug, Deserialize)]
struct PoapScanEntry {
    #[serde(rename = "tokenId", deserialize_with = "string_or_number")]
    token_id: String,
    event: PoapEvent,
}

#[derive(Debug, Deserialize)]
struct PoapEvent {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    event_url: String,
    #[serde(default)]
    description: String,
}

/// The scan API has served token ids both as strings and as numbers.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

impl From<PoapScanEntry> for UserPoapIdentity {
    fn from(entry: PoapScanEntry) -> Self {
        UserPoapIdentity {
            event_id: entry.event.id.to_string(),
            event_desc: entry.event.description,
            token_id: entry.token_id,
            event_name: entry.event.name,
            event_url: entry.event.event_url,
        }
    }
}

pub struct PoapEventLister {
    scan_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl PoapEventLister {
    pub fn new(scan_url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            scan_url: scan_url.into(),
            transport,
        }
    }

    /// Tokens held by `address`, in API order.
    pub async fn try_list_attendance(&self, address: &str) -> Result<Vec<UserPoapIdentity>, ApiError> {
        let request = HttpRequest::get(render_url(&self.scan_url, address));
        let entries: Vec<PoapScanEntry> = fetch_json(self.transport.as_ref(), request).await?;
        debug!(address = %address, tokens = entries.len(), "POAP tokens listed");
        Ok(entries.into_iter().map(UserPoapIdentity::from).collect())
    }

    /// Best-effort listing: failures are logged and yield no records.
    pub async fn list_attendance(&self, address: &str) -> Vec<UserPoapIdentity> {
        match self.try_list_attendance(address).await {
            Ok(records) => records,
            Err(e) => {
                error!(
                    address = %address,
                    error = %e,
                    error_kind = e.kind(),
                    "[poap] attendance listing failed"
                );
                Vec::new()
            }
        }
    }
}
