//! reqwest-backed catalog source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::SourceFailure;
use crate::config::Settings;
use crate::infrastructure::traits::CatalogSource;
use crate::infrastructure::{InfraError, InfraResult};

/// Catalog source talking to the real REST service.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: Client,
}

impl HttpCatalogSource {
    /// Build a client with the configured timeout and user agent.
    pub fn new(settings: &Settings) -> InfraResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| InfraError::Http {
                context: "build HTTP client".to_string(),
                source: e,
            })?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    #[instrument(level = "debug", skip(self))]
    async fn get_json(&self, url: &str) -> Result<Value, SourceFailure> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceFailure::Transport(e.to_string()))?;

        let status = response.status();
        debug!(%status, "response received");
        if !status.is_success() {
            return Err(SourceFailure::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SourceFailure::Malformed {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }
}
