//! Integration tests for the aggregation driver using wiremock

use crate_catalog_lib::facts::hosting::Provider;
use crate_catalog_lib::facts::{Aggregator, CrateEntry, Fetcher, MemoryStore, Registry, Warning};
use serde_json::json;
use serde_yaml::Value;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn aggregator(server: &MockServer) -> (Aggregator, Arc<Fetcher>) {
    let fetcher = Arc::new(Fetcher::new(Arc::new(MemoryStore::new())).expect("fetcher"));
    let registry = Registry::new(Arc::clone(&fetcher), format!("{}/api/v1", server.uri()));
    let hosting = Provider::new(Arc::clone(&fetcher), None, server.uri()).expect("provider");
    (Aggregator::new(registry, hosting), fetcher)
}

fn entries(yaml: &str) -> Vec<CrateEntry> {
    serde_yaml::from_str(yaml).expect("valid YAML")
}

async fn mount_repo(server: &MockServer, repo: &str, stars: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{repo}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stargazers_count": stars,
            "open_issues_count": 2,
            "default_branch": "main",
            "description": "from github"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{repo}/commits/main")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"commit": {"committer": {"date": "2025-03-04T05:06:07Z"}}})))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{repo}/contributors")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"login": "a"}])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_repository_only_and_name_only_entries() {
    let mock_server = MockServer::start().await;
    mount_repo(&mock_server, "foo/bar", 10).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/crates/solo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "crate": {
                "description": "Only on crates.io",
                "repository": null,
                "documentation": "https://docs.rs/solo",
                "downloads": 100,
                "license": "MIT",
                "max_version": "0.1.0"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (aggregator, _) = aggregator(&mock_server);
    let input = entries(
        r"
- repository: https://github.com/foo/bar
- name: solo
",
    );

    let aggregation = aggregator.aggregate(input).await.expect("aggregation");
    assert_eq!(aggregation.entries.len(), 2);

    let first = &aggregation.entries[0];
    assert_eq!(first.get_str("github"), Some("foo/bar"));
    assert_eq!(first.get("stargazers_count").and_then(Value::as_u64), Some(10));
    assert_eq!(first.get("contributor_count").and_then(Value::as_u64), Some(1));
    assert_eq!(first.get_str("last_commit"), Some("2025-03-04T05:06:07Z"));
    for registry_only in ["license", "downloads", "max_version", "documentation"] {
        assert!(!first.contains_key(registry_only), "unexpected {registry_only}");
    }

    let second = &aggregation.entries[1];
    assert_eq!(second.get_str("license"), Some("MIT"));
    assert_eq!(second.get("downloads").and_then(Value::as_u64), Some(100));
    assert!(!second.contains_key("repository"));
    for host_only in ["stargazers_count", "open_issues_count", "last_commit", "contributor_count", "github"] {
        assert!(!second.contains_key(host_only), "unexpected {host_only}");
    }

    assert_eq!(
        aggregation.warnings,
        [
            Warning::MissingName {
                repository: "https://github.com/foo/bar".into()
            },
            Warning::MissingDocs {
                label: "https://github.com/foo/bar".into()
            },
            Warning::MissingGithub { label: "solo".into() },
        ]
    );
}

#[tokio::test]
async fn test_curated_fields_win() {
    let mock_server = MockServer::start().await;
    mount_repo(&mock_server, "acme/widget", 99).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/crates/widget"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "crate": {
                "description": "registry description",
                "repository": "https://github.com/acme/widget",
                "documentation": "https://docs.rs/widget",
                "downloads": 100,
                "license": "Apache-2.0"
            }
        })))
        .mount(&mock_server)
        .await;

    let (aggregator, _) = aggregator(&mock_server);
    let input = entries(
        r"
- name: widget
  license: MIT
  stargazers_count: 1
  tags: [gui]
",
    );

    let aggregation = aggregator.aggregate(input).await.expect("aggregation");
    let entry = &aggregation.entries[0];

    assert_eq!(entry.get_str("license"), Some("MIT"), "curated beats registry");
    assert_eq!(entry.get("downloads").and_then(Value::as_u64), Some(100), "registry fills gaps");
    assert_eq!(entry.get("stargazers_count").and_then(Value::as_u64), Some(1), "curated beats GitHub");
    assert_eq!(entry.get_str("description"), Some("registry description"), "registry beats GitHub");
    assert_eq!(entry.get("open_issues_count").and_then(Value::as_u64), Some(2), "GitHub fills gaps");
    assert_eq!(entry.get_str("github"), Some("acme/widget"), "repository found through the registry");
    assert!(entry.contains_key("tags"));
    assert!(aggregation.warnings.is_empty(), "{:?}", aggregation.warnings);
}

#[tokio::test]
async fn test_invalid_entry_halts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/crates/first"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"crate": {}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/crates/third"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"crate": {}})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (aggregator, _) = aggregator(&mock_server);
    let input = entries(
        r"
- name: first
- description: nobody
- name: third
",
    );

    let err = aggregator.aggregate(input).await.expect_err("invalid entry must halt the run");
    assert!(err.to_string().contains("crate entry is invalid"), "{err}");
}

#[tokio::test]
async fn test_non_github_repository_warns() {
    let mock_server = MockServer::start().await;
    let (aggregator, fetcher) = aggregator(&mock_server);

    let input = entries(
        r"
- repository: https://gitlab.com/foo/bar
  documentation: https://foo.gitlab.io/bar
",
    );

    let aggregation = aggregator.aggregate(input).await.expect("aggregation");

    assert_eq!(aggregation.entries, entries("[{repository: 'https://gitlab.com/foo/bar', documentation: 'https://foo.gitlab.io/bar'}]"));
    assert_eq!(fetcher.network_requests(), 0);
    assert_eq!(aggregation.warnings.len(), 2);
    assert_eq!(
        aggregation.warnings[1],
        Warning::MissingGithub {
            label: "https://gitlab.com/foo/bar".into()
        },
        "unnamed entries are labelled by their repository"
    );
}

#[tokio::test]
async fn test_repeated_crates_hit_the_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/crates/dup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"crate": {"documentation": "https://docs.rs/dup"}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (aggregator, fetcher) = aggregator(&mock_server);
    let aggregation = aggregator
        .aggregate(entries("[{name: dup}, {name: dup, featured: true}]"))
        .await
        .expect("aggregation");

    assert_eq!(aggregation.entries.len(), 2);
    assert_eq!(fetcher.network_requests(), 1);
    assert!(aggregation.entries[1].contains_key("featured"));
}
