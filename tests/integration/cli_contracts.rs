use std::fs;
use std::sync::Arc;

use social_indexer::config::{CoAttendeeFailurePolicy, ConfigLoader, IndexerConfig};
use social_indexer::tooling::cli::{CliContext, Commands};
use social_indexer::Fetcher;
use tempfile::TempDir;

use crate::support::{holders_body, poap_scan, scan_body, FakeUpstream, ME};

#[test]
fn recommend_json_contract_has_required_fields() {
    let upstream = FakeUpstream::new()
        .get(poap_scan(), scan_body(&[7]))
        .event("7", holders_body(&[("701", "0xaaa")]));
    let config = IndexerConfig::default();
    let fetcher = Fetcher::with_transport(&config, Arc::new(upstream));
    let cli = CliContext::with_fetcher(config, fetcher).unwrap();

    let output = cli
        .execute(&Commands::Recommend {
            address: ME.to_string(),
            format: "json".to_string(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.get("address").and_then(|v| v.as_str()), Some(ME));
    assert!(parsed.get("generated_at").and_then(|v| v.as_str()).is_some());
    assert_eq!(parsed.get("total").and_then(|v| v.as_u64()), Some(1));
    let first = &parsed["results"][0];
    assert_eq!(first["address"], "0xaaa");
    assert_eq!(first["event_id"], "7");
    assert_eq!(first["token_id"], "701");
}

#[test]
fn connections_text_lists_platform_column() {
    let upstream = FakeUpstream::new()
        .get(
            crate::support::context_following(),
            r#"{"relationships":[{"actor":"ctx:a"}],"profiles":{"ctx:a":[{"address":"alice.eth"}]}}"#,
        )
        .get(crate::support::context_followers(), "{}");
    let mut config = IndexerConfig::default();
    config.platforms.rarible.enabled = false;
    let fetcher = Fetcher::with_transport(&config, Arc::new(upstream));
    let cli = CliContext::with_fetcher(config, fetcher).unwrap();

    let output = cli
        .execute(&Commands::Connections {
            address: ME.to_string(),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("alice.eth"));
    assert!(output.contains("Context"));
    assert!(output.ends_with("Total: 1 connection(s)"));
}

#[test]
fn workspace_file_feeds_cli_context() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("indexer.toml"),
        "[poap]\nfailure_policy = \"skip\"\n\n[platforms.context]\nenabled = false\n",
    )
    .unwrap();

    let config = ConfigLoader::load(temp_dir.path()).unwrap();
    assert!(!config.platforms.context.enabled);

    let cli = CliContext::new(temp_dir.path().to_path_buf(), None).unwrap();
    let rendered = cli.execute(&Commands::Config).unwrap();
    assert!(rendered.contains("failure_policy = \"skip\""));
}

#[test]
fn explicit_config_file_loads_before_context() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    fs::write(&path, "[poap]\nfailure_policy = \"truncate\"\n").unwrap();

    let config = CliContext::load_config(temp_dir.path(), Some(&path)).unwrap();
    assert_eq!(config.poap.failure_policy, CoAttendeeFailurePolicy::Truncate);

    let cli = CliContext::from_config(config).unwrap();
    assert_eq!(cli.config().poap.failure_policy, CoAttendeeFailurePolicy::Truncate);
    let rendered = cli.execute(&Commands::Config).unwrap();
    assert!(rendered.contains("failure_policy = \"truncate\""));
}

#[test]
fn invalid_config_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "[http]\ntimeout_secs = 0\n").unwrap();

    let err = match CliContext::new(temp_dir.path().to_path_buf(), Some(path)) {
        Ok(_) => panic!("zero timeout must be rejected"),
        Err(e) => e,
    };
    assert_eq!(err.kind(), "config");
}
