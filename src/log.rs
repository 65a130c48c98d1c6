use std::fs::{File, OpenOptions};
use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::JsonFields;
use tracing_subscriber::prelude::*;

/// Filter used when RUST_LOG is unset and `--verbose` is not given
const DEFAULT_FILTER: &str = "info";

/// Filter used for `--verbose`: this crate's debug events, everything else at info
const VERBOSE_FILTER: &str = "info,orb_datasource=debug";

/// Installs a JSON subscriber appending to `log_path`.
///
/// RUST_LOG takes precedence over `verbose`.
pub fn init(log_path: &Path, verbose: bool) -> anyhow::Result<()> {
    let log_file = open_log_file(log_path).inspect_err(|e| {
        eprintln!("Failed to open log file {:?}: {}", log_path, e);
    })?;

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(log_file)
        .fmt_fields(JsonFields::default());

    let env_filter = EnvFilter::try_new(filter_directives(
        std::env::var("RUST_LOG").ok().as_deref(),
        verbose,
    ))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .try_init()?;

    Ok(())
}

fn open_log_file(log_path: &Path) -> std::io::Result<File> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    OpenOptions::new().create(true).append(true).open(log_path)
}

fn filter_directives(rust_log: Option<&str>, verbose: bool) -> &str {
    match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives,
        _ if verbose => VERBOSE_FILTER,
        _ => DEFAULT_FILTER,
    }
}
