use std::collections::HashSet;
use std::sync::Arc;

use social_indexer::config::IndexerConfig;
use social_indexer::identity::is_resolvable_identity;
use social_indexer::transport::RequestMethod;
use social_indexer::{ConnectionEntry, Fetcher, PlatformTag};

use crate::support::{
    context_followers, context_following, rarible_followers, rarible_followings, FakeUpstream, ME,
};

const FRIEND: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";

fn pairs(edges: &[ConnectionEntry], platform: PlatformTag) -> Vec<(String, String)> {
    edges
        .iter()
        .filter(|e| e.platform() == platform)
        .map(|e| (e.from().to_string(), e.to().to_string()))
        .collect()
}

fn healthy_upstream() -> FakeUpstream {
    FakeUpstream::new()
        .get(
            context_following(),
            format!(
                r#"{{"relationships":[{{"actor":"{}"}},{{"actor":"ctx:alice"}},{{"actor":"ctx:bot"}}],
                    "profiles":{{"ctx:alice":[{{"address":"alice.eth"}}],"ctx:bot":[{{"address":"@bot"}}]}}}}"#,
                FRIEND
            ),
        )
        .get(
            context_followers(),
            r#"{"relationships":[{"actor":"ctx:bob"}],"profiles":{"ctx:bob":[{"address":"bob.eth"}]}}"#,
        )
        .post(
            rarible_followings(),
            format!(r#"[{{"following":{{"owner":"{}","user":"carol.eth"}}}}]"#, ME),
        )
        .post(
            rarible_followers(),
            format!(
                r#"[{{"following":{{"owner":"dave.eth","user":"{me}"}}}},
                    {{"following":{{"owner":"5f2b9a0c","user":"{me}"}}}}]"#,
                me = ME
            ),
        )
}

#[tokio::test]
async fn merges_both_platforms_with_per_platform_order() {
    let fetcher = Fetcher::with_transport(&IndexerConfig::default(), Arc::new(healthy_upstream()));

    let edges = fetcher.fetch_connections(ME).await;
    assert_eq!(
        pairs(&edges, PlatformTag::Context),
        vec![
            (ME.to_string(), FRIEND.to_string()),
            (ME.to_string(), "alice.eth".to_string()),
            ("bob.eth".to_string(), ME.to_string()),
        ]
    );
    assert_eq!(
        pairs(&edges, PlatformTag::Rarible),
        vec![
            ("dave.eth".to_string(), ME.to_string()),
            (ME.to_string(), "carol.eth".to_string()),
        ]
    );
    assert_eq!(edges.len(), 5);
}

#[tokio::test]
async fn every_edge_has_resolvable_endpoints() {
    let fetcher = Fetcher::with_transport(&IndexerConfig::default(), Arc::new(healthy_upstream()));

    for edge in fetcher.fetch_connections(ME).await {
        assert!(is_resolvable_identity(edge.from()), "bad from: {}", edge.from());
        assert!(is_resolvable_identity(edge.to()), "bad to: {}", edge.to());
    }
}

#[tokio::test]
async fn platform_down_on_both_calls_leaves_the_other_platform() {
    let upstream = FakeUpstream::new()
        .down(RequestMethod::Get, context_following())
        .down(RequestMethod::Get, context_followers())
        .post(
            rarible_followings(),
            format!(r#"[{{"following":{{"owner":"{}","user":"carol.eth"}}}}]"#, ME),
        )
        .post(rarible_followers(), "[]");
    let fetcher = Fetcher::with_transport(&IndexerConfig::default(), Arc::new(upstream));

    let edges = fetcher.fetch_connections(ME).await;
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].platform(), PlatformTag::Rarible);
    assert_eq!(edges[0].to(), "carol.eth");
}

#[tokio::test]
async fn one_failed_direction_discards_the_whole_platform() {
    let upstream = healthy_upstream().down(RequestMethod::Post, rarible_followers());
    let fetcher = Fetcher::with_transport(&IndexerConfig::default(), Arc::new(upstream));

    let edges = fetcher.fetch_connections(ME).await;
    assert!(pairs(&edges, PlatformTag::Rarible).is_empty());
    assert_eq!(pairs(&edges, PlatformTag::Context).len(), 3);
}

#[tokio::test]
async fn all_platforms_down_is_an_empty_graph() {
    let fetcher = Fetcher::with_transport(&IndexerConfig::default(), Arc::new(FakeUpstream::new()));
    assert!(fetcher.fetch_connections(ME).await.is_empty());
}

#[tokio::test]
async fn repeated_calls_agree_as_sets() {
    let upstream = Arc::new(healthy_upstream());
    let fetcher = Fetcher::with_transport(&IndexerConfig::default(), upstream.clone());

    let first: HashSet<ConnectionEntry> = fetcher.fetch_connections(ME).await.into_iter().collect();
    let second: HashSet<ConnectionEntry> = fetcher.fetch_connections(ME).await.into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(upstream.sent().len(), 8);
}

#[tokio::test]
async fn disabled_platform_is_never_contacted() {
    let mut config = IndexerConfig::default();
    config.platforms.context.enabled = false;
    let upstream = Arc::new(healthy_upstream());
    let fetcher = Fetcher::with_transport(&config, upstream.clone());

    let edges = fetcher.fetch_connections(ME).await;
    assert!(edges.iter().all(|e| e.platform() == PlatformTag::Rarible));
    assert!(upstream.sent().iter().all(|r| !r.url.contains("context.app")));
}
