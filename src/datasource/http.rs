//! HTTP client shared by all requests of one datasource

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::datasource::error::DatasourceError;

/// HTTP client bound to a datasource identity
#[derive(Debug, Clone)]
pub struct Http {
    client: reqwest::Client,
    id: &'static str,
}

impl Http {
    /// Creates a client whose user agent names the owning datasource
    pub fn new(id: &'static str) -> Result<Self, DatasourceError> {
        let client = reqwest::Client::builder()
            .user_agent(format!(
                "{}/{} ({})",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                id
            ))
            .build()?;

        Ok(Self { client, id })
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    /// POSTs `body` as JSON and decodes the JSON response
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, DatasourceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client.post(url).json(body).send().await?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(DatasourceError::NotFound(url.to_string()));
        }

        if !status.is_success() {
            debug!(datasource = self.id, %status, url, "Registry returned error status");
            return Err(DatasourceError::UnexpectedStatus(status));
        }

        response
            .json()
            .await
            .map_err(|e| DatasourceError::InvalidResponse(e.to_string()))
    }
}
