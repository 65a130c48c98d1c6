use std::error::Error as StdError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to open database: {0}")]
    Connection(#[from] rusqlite::Error),

    #[error("Failed to create schema: {0}")]
    SchemaCreation(String),

    #[error("Database query failed: {0}")]
    Query(String),

    #[error("Cache connection lock poisoned")]
    LockPoisoned,
}

#[derive(Debug, Error)]
pub enum DatasourceError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to serialize release data: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

impl DatasourceError {
    /// Whether the error means the package does not exist: an explicit 404
    /// or a registry host that cannot be resolved.
    pub fn is_not_found(&self) -> bool {
        match self {
            DatasourceError::NotFound(_) => true,
            DatasourceError::Request(e) => is_dns_failure(e),
            _ => false,
        }
    }
}

/// Walks the source chain looking for a name resolution failure.
pub(crate) fn is_dns_failure(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        let message = e.to_string();
        if message.contains("dns error") || message.contains("failed to lookup address") {
            return true;
        }
        current = e.source();
    }
    false
}
