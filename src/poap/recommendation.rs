//! Sequential event -> co-attendee flattening.

use super::co_attendees::PoapCoAttendeeResolver;
use super::events::PoapEventLister;
use crate::config::CoAttendeeFailurePolicy;
use crate::types::PoapRecommendation;
use tracing::{info, warn};

pub struct PoapRecommender {
    lister: PoapEventLister,
    resolver: PoapCoAttendeeResolver,
    failure_policy: CoAttendeeFailurePolicy,
}

impl PoapRecommender {
    pub fn new(
        lister: PoapEventLister,
        resolver: PoapCoAttendeeResolver,
        failure_policy: CoAttendeeFailurePolicy,
    ) -> Self {
        Self {
            lister,
            resolver,
            failure_policy,
        }
    }

    pub fn lister(&self) -> &PoapEventLister {
        &self.lister
    }

    /// Co-attendees of every event `address` attended, event by event in
    /// listing order. Someone met at two events appears once per event.
    pub async fn recommend(&self, address: &str) -> Vec<PoapRecommendation> {
        let events = self.lister.list_attendance(address).await;
        let mut results = Vec::new();

        for (index, event) in events.iter().enumerate() {
            let err = match self.resolver.list_co_attendees(&event.event_id).await {
                Ok(records) => {
                    results.extend(records);
                    continue;
                }
                Err(e) => e,
            };
            match self.failure_policy {
                CoAttendeeFailurePolicy::Skip => {
                    warn!(
                        address = %address,
                        event_id = %event.event_id,
                        error_kind = err.kind(),
                        "Skipping event after subgraph failure"
                    );
                }
                CoAttendeeFailurePolicy::Truncate => {
                    warn!(
                        address = %address,
                        event_id = %event.event_id,
                        kept = results.len(),
                        remaining = events.len() - index - 1,
                        "Truncating recommendations after subgraph failure"
                    );
                    break;
                }
                CoAttendeeFailurePolicy::Abort => {
                    warn!(
                        address = %address,
                        event_id = %event.event_id,
                        discarded = results.len(),
                        "Dropping recommendations after subgraph failure"
                    );
                    return Vec::new();
                }
            }
        }

        info!(
            address = %address,
            events = events.len(),
            recommendations = results.len(),
            "POAP recommendations assembled"
        );
        results
    }
}
