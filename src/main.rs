use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use orb_datasource::config::{ORB_GRAPHQL_URL, Paths};
use orb_datasource::datasource::cache::SqliteCache;
use orb_datasource::datasource::http::Http;
use orb_datasource::datasource::sources::{OrbDatasource, orb};
use orb_datasource::datasource::{Datasource, GetReleasesConfig};
use orb_datasource::log;

/// Look up the published releases of a CircleCI orb
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Orb name, e.g. "circleci/node"
    lookup_name: String,

    /// GraphQL endpoint of the orb registry
    #[arg(long, default_value = ORB_GRAPHQL_URL)]
    endpoint: String,

    /// Directory holding the cache database and the log file
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log this crate's debug events (ignored when RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,

    /// Remove expired cache entries before the lookup
    #[arg(long)]
    purge: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let paths = Paths::resolve(cli.data_dir);
    log::init(&paths.log_path(), cli.verbose)?;

    let cache = Arc::new(SqliteCache::new(&paths.db_path())?);
    if cli.purge {
        let removed = cache.purge_expired()?;
        info!(removed, "Purged expired cache entries");
    }

    let datasource = OrbDatasource::with_endpoint(Http::new(orb::ID)?, cache, &cli.endpoint);
    let result = datasource
        .get_releases(&GetReleasesConfig::new(cli.lookup_name))
        .await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
