//! Fetcher facade.
//!
//! Wires one shared transport into the connection aggregator and the POAP
//! recommender. Callers that only want the graph never touch adapters.

use crate::config::IndexerConfig;
use crate::connections::{ConnectionAggregator, PlatformRegistry};
use crate::error::ApiError;
use crate::poap::{PoapCoAttendeeResolver, PoapEventLister, PoapRecommender};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{ConnectionEntry, PlatformTag, PoapRecommendation, UserPoapIdentity};
use std::sync::Arc;
use tracing::debug;

pub struct Fetcher {
    aggregator: ConnectionAggregator,
    recommender: PoapRecommender,
    platforms: Vec<PlatformTag>,
}

impl Fetcher {
    /// Build a fetcher backed by a real HTTP client.
    pub fn new(config: &IndexerConfig) -> Result<Self, ApiError> {
        let transport = Arc::new(ReqwestTransport::new(&config.http)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Build a fetcher over an injected transport.
    pub fn with_transport(config: &IndexerConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let registry = PlatformRegistry::from_config(&config.platforms, Arc::clone(&transport));
        Self::with_registry(config, registry, transport)
    }

    /// Build a fetcher over a pre-populated registry.
    pub fn with_registry(
        config: &IndexerConfig,
        registry: PlatformRegistry,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let platforms = registry.platforms();
        debug!(platforms = ?platforms, "Fetcher assembled");

        let recommender = PoapRecommender::new(
            PoapEventLister::new(config.poap.scan_url.clone(), Arc::clone(&transport)),
            PoapCoAttendeeResolver::new(config.poap.subgraph_url.clone(), transport),
            config.poap.failure_policy,
        );
        Self {
            aggregator: registry.into_aggregator(),
            recommender,
            platforms,
        }
    }

    pub fn platforms(&self) -> &[PlatformTag] {
        &self.platforms
    }

    /// Merged connection graph for `address` across every enabled platform.
    pub async fn fetch_connections(&self, address: &str) -> Vec<ConnectionEntry> {
        self.aggregator.fetch_connections(address).await
    }

    /// Co-attendee recommendations for `address`.
    pub async fn recommend(&self, address: &str) -> Vec<PoapRecommendation> {
        self.recommender.recommend(address).await
    }

    pub async fn list_attendance(&self, address: &str) -> Vec<UserPoapIdentity> {
        self.recommender.lister().list_attendance(address).await
    }
}
