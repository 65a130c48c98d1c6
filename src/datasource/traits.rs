//! Datasource trait for looking up package releases

use crate::datasource::types::{GetReleasesConfig, ReleaseResult};

/// Trait implemented by every release datasource
#[async_trait::async_trait]
pub trait Datasource: Send + Sync {
    /// Returns the identifier of this datasource (e.g., "orb")
    fn id(&self) -> &'static str;

    /// Looks up all published releases of a package
    ///
    /// # Returns
    /// * `Some(ReleaseResult)` - Releases in registry order
    /// * `None` - If the package does not exist or the lookup failed
    async fn get_releases(&self, config: &GetReleasesConfig) -> Option<ReleaseResult>;
}
