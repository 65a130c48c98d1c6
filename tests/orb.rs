//! CircleCI orb datasource tests against an on-disk cache

use std::sync::Arc;

use mockito::Server;
use orb_datasource::datasource::cache::{CacheStore, SqliteCache};
use orb_datasource::datasource::http::Http;
use orb_datasource::datasource::sources::{OrbDatasource, orb};
use orb_datasource::datasource::{Datasource, GetReleasesConfig, ReleaseResult};
use tempfile::TempDir;

fn create_test_cache() -> (TempDir, Arc<SqliteCache>) {
    let temp_dir = TempDir::new().unwrap();
    let cache = SqliteCache::new(&temp_dir.path().join("test.db")).unwrap();
    (temp_dir, Arc::new(cache))
}

fn create_datasource(endpoint: &str, cache: Arc<SqliteCache>) -> OrbDatasource {
    OrbDatasource::with_endpoint(Http::new(orb::ID).unwrap(), cache, endpoint)
}

#[tokio::test]
async fn second_lookup_is_served_from_cache() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql-unstable")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": {"orb": {
                "name": "circleci/node",
                "homeUrl": "https://github.com/CircleCI-Public/node-orb",
                "versions": [
                    {"version": "5.1.0", "createdAt": "2023-02-01T00:00:00Z"},
                    {"version": "5.0.3"}
                ]
            }}}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let (_temp_dir, cache) = create_test_cache();
    let datasource = create_datasource(
        &format!("{}/graphql-unstable", server.url()),
        cache.clone(),
    );
    let config = GetReleasesConfig::new("circleci/node");

    let first = datasource.get_releases(&config).await;
    let second = datasource.get_releases(&config).await;

    mock.assert_async().await;
    assert!(first.is_some());
    assert_eq!(first, second);

    let stored = cache.get("orb", "circleci/node").await.unwrap().unwrap();
    let stored: ReleaseResult = serde_json::from_str(&stored).unwrap();
    assert_eq!(Some(stored), first);
}

#[tokio::test]
async fn missing_orb_is_not_cached() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql-unstable")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {"orb": null}}"#)
        .expect(2)
        .create_async()
        .await;

    let (_temp_dir, cache) = create_test_cache();
    let datasource = create_datasource(
        &format!("{}/graphql-unstable", server.url()),
        cache.clone(),
    );
    let config = GetReleasesConfig::new("nobody/nothing");

    assert_eq!(datasource.get_releases(&config).await, None);
    assert_eq!(datasource.get_releases(&config).await, None);

    mock.assert_async().await;
    assert_eq!(cache.get("orb", "nobody/nothing").await.unwrap(), None);
}

#[tokio::test]
async fn unresolvable_registry_host_yields_none() {
    let (_temp_dir, cache) = create_test_cache();
    let datasource = create_datasource("http://orb-registry.invalid/graphql-unstable", cache);

    let result = datasource
        .get_releases(&GetReleasesConfig::new("circleci/node"))
        .await;

    assert_eq!(result, None);
}

#[test]
fn datasource_id_is_orb() {
    let (_temp_dir, cache) = create_test_cache();
    let datasource = create_datasource("http://localhost/graphql-unstable", cache);

    assert_eq!(datasource.id(), "orb");
}
