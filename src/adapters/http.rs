use crate::domain::ports::SourceFetcher;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Fetches the raw user list with a single GET. Non-2xx is fatal; no retries.
pub struct HttpFetcher {
    client: Client,
    url: String,
}

impl HttpFetcher {
    pub fn new(url: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch(&self) -> Result<serde_json::Value> {
        tracing::info!("🌐 Fetching data from API: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(EtlError::FetchError {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}
