//! CircleCI orb registry implementation

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, trace, warn};

use crate::config::{
    ORB_CACHE_MINUTES, ORB_CACHE_NAMESPACE, ORB_GRAPHQL_URL, ORB_REGISTRY_HOMEPAGE,
};
use crate::datasource::cache::CacheStore;
use crate::datasource::error::DatasourceError;
use crate::datasource::http::Http;
use crate::datasource::traits::Datasource;
use crate::datasource::types::{GetReleasesConfig, ReleaseInfo, ReleaseResult};

/// Datasource identifier
pub const ID: &str = "orb";

const ORB_QUERY: &str =
    "query($name: String!) { orb(name: $name) { name, homeUrl, versions { version, createdAt } } }";

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<OrbData>,
}

#[derive(Debug, Deserialize)]
struct OrbData {
    orb: Option<OrbRelease>,
}

/// Orb as returned by the registry
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrbRelease {
    #[serde(default)]
    home_url: Option<String>,
    versions: Vec<OrbVersion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrbVersion {
    version: String,
    #[serde(default)]
    created_at: Option<String>,
}

impl OrbRelease {
    fn into_release_result(self, lookup_name: &str) -> ReleaseResult {
        let homepage = self
            .home_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| format!("{}/{}", ORB_REGISTRY_HOMEPAGE, lookup_name));

        let releases = self
            .versions
            .into_iter()
            .map(|v| ReleaseInfo {
                version: v.version,
                release_timestamp: v.created_at.filter(|ts| !ts.is_empty()),
            })
            .collect();

        ReleaseResult {
            homepage: Some(homepage),
            releases: Some(releases),
            ..ReleaseResult::new(lookup_name)
        }
    }
}

/// Datasource for CircleCI orbs
pub struct OrbDatasource {
    http: Http,
    cache: Arc<dyn CacheStore>,
    endpoint: String,
}

impl OrbDatasource {
    /// Creates an OrbDatasource querying the public CircleCI registry
    pub fn new(http: Http, cache: Arc<dyn CacheStore>) -> Self {
        Self::with_endpoint(http, cache, ORB_GRAPHQL_URL)
    }

    /// Creates an OrbDatasource with a custom GraphQL endpoint
    pub fn with_endpoint(http: Http, cache: Arc<dyn CacheStore>, endpoint: &str) -> Self {
        Self {
            http,
            cache,
            endpoint: endpoint.to_string(),
        }
    }

    async fn cached(&self, lookup_name: &str) -> Option<ReleaseResult> {
        let raw = self
            .cache
            .get(ORB_CACHE_NAMESPACE, lookup_name)
            .await
            .inspect_err(|e| warn!(lookup_name, "Failed to read orb cache: {}", e))
            .ok()??;

        serde_json::from_str(&raw)
            .inspect_err(|e| debug!(lookup_name, "Discarding unreadable cache entry: {}", e))
            .ok()
    }

    async fn fetch(&self, lookup_name: &str) -> Result<Option<ReleaseResult>, DatasourceError> {
        let body = GraphqlRequest {
            query: ORB_QUERY,
            variables: json!({ "name": lookup_name }),
        };

        let response: GraphqlResponse = self.http.post_json(&self.endpoint, &body).await?;

        let Some(orb) = response.data.and_then(|data| data.orb) else {
            debug!(lookup_name, "Failed to look up orb");
            return Ok(None);
        };

        Ok(Some(orb.into_release_result(lookup_name)))
    }

    async fn store(&self, lookup_name: &str, dep: &ReleaseResult) -> Result<(), DatasourceError> {
        let value = serde_json::to_string(dep)?;
        self.cache
            .set(ORB_CACHE_NAMESPACE, lookup_name, &value, ORB_CACHE_MINUTES)
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Datasource for OrbDatasource {
    fn id(&self) -> &'static str {
        ID
    }

    async fn get_releases(&self, config: &GetReleasesConfig) -> Option<ReleaseResult> {
        let lookup_name = config.lookup_name.as_str();
        debug!(lookup_name, "orb.get_releases()");

        if let Some(cached) = self.cached(lookup_name).await {
            return Some(cached);
        }

        match self.fetch(lookup_name).await {
            Ok(Some(dep)) => {
                trace!(?dep, "dep");
                if let Err(e) = self.store(lookup_name, &dep).await {
                    warn!(lookup_name, "Failed to cache orb releases: {}", e);
                }
                Some(dep)
            }
            Ok(None) => None,
            Err(err) => {
                debug!(datasource = self.http.id(), error = %err, "CircleCI Orb lookup error");
                if err.is_not_found() {
                    debug!(lookup_name, "CircleCI Orb lookup failure: not found");
                } else {
                    warn!(lookup_name, "CircleCI Orb lookup failure: Unknown error");
                }
                None
            }
        }
    }
}
