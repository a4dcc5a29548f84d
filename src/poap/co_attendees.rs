//! Co-attendee lookup against the POAP subgraph.

use crate::error::ApiError;
use crate::transport::{fetch_json, HttpRequest, HttpTransport};
use crate::types::PoapRecommendation;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Debug, Serialize)]
struct GraphQuery {
    query: String,
}

#[derive(Debug, Deserialize)]
struct PoapGraphResp {
    data: Option<PoapGraphData>,
}

#[derive(Debug, Deserialize)]
struct PoapGraphData {
    event: Option<PoapGraphEvent>,
}

#[derive(Debug, Deserialize)]
struct PoapGraphEvent {
    #[serde(default)]
    tokens: Vec<PoapGraphToken>,
}

#[derive(Debug, Deserialize)]
struct PoapGraphToken {
    id: String,
    owner: PoapGraphOwner,
}

#[derive(Debug, Deserialize)]
struct PoapGraphOwner {
    id: String,
}

fn event_tokens_query(event_id: &str) -> String {
    format!(
        r#"{{ event(id: "{}") {{ tokens {{ id owner {{ id }} }} }} }}"#,
        event_id.replace('\\', "\\\\").replace('"', "\\\"")
    )
}

pub struct PoapCoAttendeeResolver {
    subgraph_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl PoapCoAttendeeResolver {
    pub fn new(subgraph_url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            subgraph_url: subgraph_url.into(),
            transport,
        }
    }

    /// Every holder of `event_id`'s token, in subgraph order.
    ///
    /// A missing event yields an empty list. Errors are logged here and
    /// returned so the caller decides whether to keep going.
    pub async fn list_co_attendees(&self, event_id: &str) -> Result<Vec<PoapRecommendation>, ApiError> {
        match self.query_event(event_id).await {
            Ok(records) => {
                debug!(event_id = %event_id, holders = records.len(), "POAP event holders resolved");
                Ok(records)
            }
            Err(e) => {
                error!(
                    event_id = %event_id,
                    error = %e,
                    error_kind = e.kind(),
                    "[poap] subgraph query failed"
                );
                Err(e)
            }
        }
    }

    async fn query_event(&self, event_id: &str) -> Result<Vec<PoapRecommendation>, ApiError> {
        let body = serde_json::to_vec(&GraphQuery {
            query: event_tokens_query(event_id),
        })?;
        let request = HttpRequest::post(self.subgraph_url.clone(), body);
        let resp: PoapGraphResp = fetch_json(self.transport.as_ref(), request).await?;

        let tokens = resp
            .data
            .and_then(|data| data.event)
            .map(|event| event.tokens)
            .unwrap_or_default();
        Ok(tokens
            .into_iter()
            .map(|token| PoapRecommendation {
                address: token.owner.id,
                event_id: event_id.to_string(),
                token_id: token.id,
            })
            .collect())
    }
}
