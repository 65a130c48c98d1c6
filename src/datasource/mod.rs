// Datasource layer
// - traits.rs: Datasource trait definition
// - types.rs: Common types (ReleaseResult, ReleaseInfo)
// - error.rs: Datasource and cache errors
// - cache.rs: Cache store trait and SQLite implementation
// - http.rs: Per-datasource HTTP client
// - sources/: Datasource implementations
//   - orb.rs: CircleCI orb registry (GraphQL)
pub mod cache;
pub mod error;
pub mod http;
pub mod sources;
pub mod traits;
pub mod types;

pub use traits::Datasource;
pub use types::{GetReleasesConfig, ReleaseInfo, ReleaseResult};
