use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use vitrine_model::Item;

use super::settings::ContentApiSettings;
use crate::error::{GalleryError, Result};

/// One page of the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentPage {
    pub contents: Vec<Item>,
    /// Total records on the server; absent means "page until empty".
    pub total_count: Option<usize>,
    pub offset: usize,
    pub limit: usize,
}

/// Anything that can serve paged content records.
#[async_trait]
pub trait ContentSource: Send + Sync + fmt::Debug {
    /// Whether a credential is configured. Fetches fail fast without one.
    fn has_credential(&self) -> bool;

    async fn fetch_page(&self, offset: usize, limit: usize)
    -> Result<ContentPage>;
}

/// HTTP client for the hosted content API.
#[derive(Clone)]
pub struct ContentApiClient {
    client: Client,
    settings: ContentApiSettings,
}

impl fmt::Debug for ContentApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentApiClient")
            .field("settings", &self.settings)
            .finish()
    }
}

impl ContentApiClient {
    pub fn new(settings: ContentApiSettings) -> Result<Self> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        info!(endpoint = %settings.endpoint, "content API client ready");
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ContentApiSettings {
        &self.settings
    }
}

#[async_trait]
impl ContentSource for ContentApiClient {
    fn has_credential(&self) -> bool {
        self.settings.api_key.is_some()
    }

    async fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<ContentPage> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(GalleryError::MissingCredential)?;

        debug!(offset, limit, "requesting content page");
        let response = self
            .client
            .get(self.settings.endpoint.clone())
            .query(&[("limit", limit), ("offset", offset)])
            .header(self.settings.key_header.as_str(), api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GalleryError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            GalleryError::InvalidResponse(format!(
                "content page at offset {offset} did not decode: {e}"
            ))
        })
    }
}
