//! Concurrent fan-out over registered adapters with fixed-count fan-in.

use super::adapter::PlatformAdapter;
use crate::types::{ConnectionEntry, ConnectionEntryList};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub struct ConnectionAggregator {
    adapters: Vec<Arc<dyn PlatformAdapter>>,
}

impl ConnectionAggregator {
    pub fn new(adapters: Vec<Arc<dyn PlatformAdapter>>) -> Self {
        Self { adapters }
    }

    pub fn adapter_count(&self) -> usize {
        self.adapters.len()
    }

    /// Fetch and merge edges from every adapter.
    ///
    /// Never fails: a failed adapter is logged and its edges are absent.
    /// Blocks until every dispatched task has reported; there is no timeout
    /// at this level. Cross-platform order follows arrival order.
    pub async fn fetch_connections(&self, address: &str) -> Vec<ConnectionEntry> {
        let expected = self.adapters.len();
        let (tx, mut rx) = mpsc::channel::<ConnectionEntryList>(expected.max(1));

        for adapter in &self.adapters {
            let adapter = Arc::clone(adapter);
            let tx = tx.clone();
            let address = address.to_string();
            tokio::spawn(async move {
                let list = adapter.fetch_edges(&address).await;
                // Receiver only goes away if the caller was dropped.
                let _ = tx.send(list).await;
            });
        }
        // Only task-held senders remain, so a dead task closes the channel instead of hanging.
        drop(tx);

        let mut results = Vec::new();
        let mut received = 0;
        while received < expected {
            let Some(list) = rx.recv().await else {
                warn!(
                    address = %address,
                    expected,
                    received,
                    "Connection task ended without reporting"
                );
                break;
            };
            received += 1;
            match list.outcome {
                Ok(entries) => {
                    info!(
                        address = %address,
                        platform = %list.platform,
                        edges = entries.len(),
                        "Connection source merged"
                    );
                    results.extend(entries);
                }
                Err(e) => {
                    error!(
                        address = %address,
                        platform = %list.platform,
                        error = %e,
                        error_kind = e.kind(),
                        "connection api error: {}",
                        list.message
                    );
                }
            }
        }
        results
    }
}
