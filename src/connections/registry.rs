//! Adapter registry built from configuration.
//!
//! Adding a connection source means registering another adapter here; the
//! aggregator itself is unaware of which platforms exist.

use super::adapter::PlatformAdapter;
use super::aggregator::ConnectionAggregator;
use super::context::ContextAdapter;
use super::rarible::RaribleAdapter;
use crate::config::PlatformsConfig;
use crate::transport::HttpTransport;
use crate::types::PlatformTag;
use std::sync::Arc;

#[derive(Default)]
pub struct PlatformRegistry {
    adapters: Vec<Arc<dyn PlatformAdapter>>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every enabled platform from configuration.
    pub fn from_config(platforms: &PlatformsConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let mut registry = Self::new();
        if platforms.context.enabled {
            registry.register(Arc::new(ContextAdapter::new(
                platforms.context.clone(),
                Arc::clone(&transport),
            )));
        }
        if platforms.rarible.enabled {
            registry.register(Arc::new(RaribleAdapter::new(
                platforms.rarible.clone(),
                Arc::clone(&transport),
            )));
        }
        registry
    }

    /// Register an adapter. A second adapter for the same platform replaces the first.
    pub fn register(&mut self, adapter: Arc<dyn PlatformAdapter>) {
        let platform = adapter.platform();
        self.adapters.retain(|existing| existing.platform() != platform);
        self.adapters.push(adapter);
    }

    pub fn platforms(&self) -> Vec<PlatformTag> {
        self.adapters.iter().map(|a| a.platform()).collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    pub fn into_aggregator(self) -> ConnectionAggregator {
        ConnectionAggregator::new(self.adapters)
    }
}
