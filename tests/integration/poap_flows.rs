use std::sync::Arc;

use social_indexer::config::{CoAttendeeFailurePolicy, IndexerConfig};
use social_indexer::transport::RequestMethod;
use social_indexer::{Fetcher, PoapRecommendation};

use crate::support::{holders_body, poap_scan, scan_body, FakeUpstream, ME};

fn recommendation(address: &str, event_id: &str, token_id: &str) -> PoapRecommendation {
    PoapRecommendation {
        address: address.to_string(),
        event_id: event_id.to_string(),
        token_id: token_id.to_string(),
    }
}

#[tokio::test]
async fn flattens_co_attendees_in_event_order() {
    let upstream = FakeUpstream::new()
        .get(poap_scan(), scan_body(&[1, 2]))
        .event("1", holders_body(&[("101", "0xaaa"), ("102", ME)]))
        .event("2", holders_body(&[("201", "0xaaa")]));
    let fetcher = Fetcher::with_transport(&IndexerConfig::default(), Arc::new(upstream));

    let records = fetcher.recommend(ME).await;
    assert_eq!(
        records,
        vec![
            recommendation("0xaaa", "1", "101"),
            recommendation(ME, "1", "102"),
            recommendation("0xaaa", "2", "201"),
        ]
    );
}

#[tokio::test]
async fn scan_failure_yields_nothing() {
    let upstream = FakeUpstream::new().down(RequestMethod::Get, poap_scan());
    let fetcher = Fetcher::with_transport(&IndexerConfig::default(), Arc::new(upstream));

    assert!(fetcher.recommend(ME).await.is_empty());
    assert!(fetcher.list_attendance(ME).await.is_empty());
}

fn upstream_with_failing_second_event() -> FakeUpstream {
    FakeUpstream::new()
        .get(poap_scan(), scan_body(&[1, 2, 3]))
        .event("1", holders_body(&[("101", "0xaaa")]))
        .event_down("2")
        .event("3", holders_body(&[("301", "0xccc")]))
}

#[tokio::test]
async fn subgraph_failure_discards_everything_by_default() {
    let upstream = Arc::new(upstream_with_failing_second_event());
    let fetcher = Fetcher::with_transport(&IndexerConfig::default(), upstream.clone());

    assert!(fetcher.recommend(ME).await.is_empty());
    // scan + events 1 and 2; event 3 is never queried
    assert_eq!(upstream.sent().len(), 3);
}

#[tokio::test]
async fn truncate_policy_keeps_events_before_failure() {
    let mut config = IndexerConfig::default();
    config.poap.failure_policy = CoAttendeeFailurePolicy::Truncate;
    let upstream = Arc::new(upstream_with_failing_second_event());
    let fetcher = Fetcher::with_transport(&config, upstream.clone());

    let records = fetcher.recommend(ME).await;
    assert_eq!(records, vec![recommendation("0xaaa", "1", "101")]);
    assert_eq!(upstream.sent().len(), 3);
}

#[tokio::test]
async fn skip_policy_continues_past_failed_event() {
    let mut config = IndexerConfig::default();
    config.poap.failure_policy = CoAttendeeFailurePolicy::Skip;
    let fetcher = Fetcher::with_transport(&config, Arc::new(upstream_with_failing_second_event()));

    let records = fetcher.recommend(ME).await;
    assert_eq!(
        records,
        vec![
            recommendation("0xaaa", "1", "101"),
            recommendation("0xccc", "3", "301"),
        ]
    );
}

#[tokio::test]
async fn attendance_listing_keeps_event_metadata() {
    let upstream = FakeUpstream::new().get(poap_scan(), scan_body(&[42]));
    let fetcher = Fetcher::with_transport(&IndexerConfig::default(), Arc::new(upstream));

    let records = fetcher.list_attendance(ME).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].event_id, "42");
    assert_eq!(records[0].token_id, "4242");
    assert_eq!(records[0].event_name, "Event 42");
    assert_eq!(records[0].event_url, "https://poap.xyz/e/42");
    assert_eq!(records[0].event_desc, "d42");
}
