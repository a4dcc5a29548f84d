//! Shared fixtures: an in-memory transport keyed by method and URL.

use async_trait::async_trait;
use social_indexer::error::ApiError;
use social_indexer::transport::{HttpRequest, HttpTransport, RequestMethod};
use std::collections::HashMap;
use std::sync::Mutex;

pub const ME: &str = "0x983110309620d911731ac0932219af06091b6744";

pub fn context_following() -> String {
    format!("https://context.app/api/profile/{}/following", ME)
}

pub fn context_followers() -> String {
    format!("https://context.app/api/profile/{}/followers", ME)
}

pub fn rarible_followings() -> String {
    format!(
        "https://api-mainnet.rarible.com/marketplace/api/v4/followings?owner={}",
        ME
    )
}

pub fn rarible_followers() -> String {
    format!(
        "https://api-mainnet.rarible.com/marketplace/api/v4/followers?user={}",
        ME
    )
}

pub fn poap_scan() -> String {
    format!("https://api.poap.xyz/actions/scan/{}", ME)
}

pub const SUBGRAPH: &str = "https://api.thegraph.com/subgraphs/name/poap-xyz/poap";

enum Reply {
    Body(String),
    Down,
}

/// Routes by (method, url). Subgraph POSTs are routed by the event id in the query.
#[derive(Default)]
pub struct FakeUpstream {
    routes: HashMap<(RequestMethod, String), Reply>,
    events: HashMap<String, Reply>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl FakeUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.routes
            .insert((RequestMethod::Get, url.into()), Reply::Body(body.into()));
        self
    }

    pub fn post(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.routes
            .insert((RequestMethod::Post, url.into()), Reply::Body(body.into()));
        self
    }

    pub fn down(mut self, method: RequestMethod, url: impl Into<String>) -> Self {
        self.routes.insert((method, url.into()), Reply::Down);
        self
    }

    pub fn event(mut self, event_id: &str, body: impl Into<String>) -> Self {
        self.events
            .insert(event_id.to_string(), Reply::Body(body.into()));
        self
    }

    pub fn event_down(mut self, event_id: &str) -> Self {
        self.events.insert(event_id.to_string(), Reply::Down);
        self
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }

    fn reply(reply: Option<&Reply>, url: &str) -> Result<Vec<u8>, ApiError> {
        match reply {
            Some(Reply::Body(body)) => Ok(body.clone().into_bytes()),
            Some(Reply::Down) => Err(ApiError::TransportError(format!(
                "connection refused: {}",
                url
            ))),
            None => Err(ApiError::UpstreamStatus {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}

#[async_trait]
impl HttpTransport for FakeUpstream {
    async fn send(&self, request: HttpRequest) -> Result<Vec<u8>, ApiError> {
        self.sent.lock().unwrap().push(request.clone());
        if request.method == RequestMethod::Post && request.url == SUBGRAPH {
            let body: serde_json::Value =
                serde_json::from_slice(request.body.as_deref().unwrap_or_default())?;
            let query = body["query"].as_str().unwrap_or_default();
            let event_id = query.split('"').nth(1).unwrap_or_default();
            return Self::reply(self.events.get(event_id), &request.url);
        }
        Self::reply(
            self.routes.get(&(request.method, request.url.clone())),
            &request.url,
        )
    }
}

pub fn holders_body(holders: &[(&str, &str)]) -> String {
    let tokens: Vec<String> = holders
        .iter()
        .map(|(token, owner)| format!(r#"{{"id":"{}","owner":{{"id":"{}"}}}}"#, token, owner))
        .collect();
    format!(r#"{{"data":{{"event":{{"tokens":[{}]}}}}}}"#, tokens.join(","))
}

pub fn scan_body(event_ids: &[u64]) -> String {
    let entries: Vec<String> = event_ids
        .iter()
        .map(|id| {
            format!(
                r#"{{"tokenId":"{id}{id}","event":{{"id":{id},"name":"Event {id}","event_url":"https://poap.xyz/e/{id}","description":"d{id}"}}}}"#,
                id = id
            )
        })
        .collect();
    format!("[{}]", entries.join(","))
}
