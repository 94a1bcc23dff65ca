//! Donation HTTP Client implementation

use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

use crate::error::{DonationClientError, Result};
use crate::types::{
    Donation, ErrorBody, InventoryItem, InventoryStats, ItemEnvelope, ItemListEnvelope,
    ItemRequest, StatsEnvelope,
};

/// Requests taking longer than this fail with an HTTP error
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the donation form and the food inventory API
#[derive(Debug, Clone)]
pub struct DonationClient {
    http: Client,
    base_url: Url,
}

impl DonationClient {
    /// Create a client for the server at `base_url` (e.g. "http://localhost:5000")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Send a request, turning non-success responses into [`DonationClientError::Api`]
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // JSON error bodies carry a message; framework rejections are plain text
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(err) => err.message,
            Err(_) if body.is_empty() => status.to_string(),
            Err(_) => body,
        };
        Err(DonationClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        Ok(self.send(request).await?.json().await?)
    }

    // =========================================================================
    // Donations
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<String> {
        let request = self.http.get(self.endpoint("/health")?);
        Ok(self.send(request).await?.text().await?)
    }

    /// Fetch the HTML donation form
    #[instrument(skip(self))]
    pub async fn donation_form(&self) -> Result<String> {
        let request = self.http.get(self.endpoint("/donate")?);
        Ok(self.send(request).await?.text().await?)
    }

    /// Submit a donation, returning the server's acknowledgement
    #[instrument(skip(self, donation), fields(name = %donation.name, image = %donation.image_filename))]
    pub async fn submit(&self, donation: &Donation) -> Result<String> {
        self.submit_form(donation.to_form()).await
    }

    /// Submit an arbitrary multipart form to `/donate`.
    ///
    /// Useful for sending incomplete or unusual submissions.
    pub async fn submit_form(&self, form: Form) -> Result<String> {
        let url = self.endpoint("/donate")?;
        debug!("Submitting donation to {}", url);

        let request = self.http.post(url).multipart(form);
        Ok(self.send(request).await?.text().await?)
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// List all items, consumed ones included
    pub async fn list_items(&self) -> Result<Vec<InventoryItem>> {
        let request = self.http.get(self.endpoint("/api/items")?);
        let envelope: ItemListEnvelope = self.send_json(request).await?;
        Ok(envelope.items)
    }

    pub async fn get_item(&self, id: Uuid) -> Result<InventoryItem> {
        let request = self.http.get(self.endpoint(&format!("/api/items/{}", id))?);
        let envelope: ItemEnvelope = self.send_json(request).await?;
        Ok(envelope.item)
    }

    #[instrument(skip(self, item), fields(name = %item.name))]
    pub async fn create_item(&self, item: &ItemRequest) -> Result<InventoryItem> {
        let request = self.http.post(self.endpoint("/api/items")?).json(item);
        let envelope: ItemEnvelope = self.send_json(request).await?;
        Ok(envelope.item)
    }

    #[instrument(skip(self, item))]
    pub async fn update_item(&self, id: Uuid, item: &ItemRequest) -> Result<InventoryItem> {
        let url = self.endpoint(&format!("/api/items/{}", id))?;
        let envelope: ItemEnvelope = self.send_json(self.http.put(url).json(item)).await?;
        Ok(envelope.item)
    }

    #[instrument(skip(self))]
    pub async fn consume_item(&self, id: Uuid) -> Result<InventoryItem> {
        let url = self.endpoint(&format!("/api/items/{}/consume", id))?;
        let envelope: ItemEnvelope = self.send_json(self.http.patch(url)).await?;
        Ok(envelope.item)
    }

    /// Delete an item, returning it as it was before removal
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: Uuid) -> Result<InventoryItem> {
        let url = self.endpoint(&format!("/api/items/{}", id))?;
        let envelope: ItemEnvelope = self.send_json(self.http.delete(url)).await?;
        Ok(envelope.item)
    }

    pub async fn stats(&self) -> Result<InventoryStats> {
        let request = self.http.get(self.endpoint("/api/stats")?);
        let envelope: StatsEnvelope = self.send_json(request).await?;
        Ok(envelope.stats)
    }
}
