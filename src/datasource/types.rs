//! Common types for release lookups

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Input of a release lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetReleasesConfig {
    /// Package name as written by the user (e.g., "circleci/node")
    pub lookup_name: String,
}

impl GetReleasesConfig {
    pub fn new(lookup_name: impl Into<String>) -> Self {
        Self {
            lookup_name: lookup_name.into(),
        }
    }
}

/// A single published version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseInfo {
    pub version: String,
    /// Publish time as reported by the registry, if any
    pub release_timestamp: Option<String>,
}

/// Normalized release metadata returned by a datasource and cached verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseResult {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Releases in registry order
    pub releases: Option<Vec<ReleaseInfo>>,
    /// Reserved for callers; datasources leave it empty
    #[serde(default)]
    pub versions: IndexMap<String, serde_json::Value>,
}

impl ReleaseResult {
    /// Creates an empty result for the given package name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            homepage: None,
            releases: None,
            versions: IndexMap::new(),
        }
    }

    /// Returns the versions in registry order
    pub fn version_names(&self) -> Vec<&str> {
        self.releases
            .iter()
            .flatten()
            .map(|r| r.version.as_str())
            .collect()
    }
}
