use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::api::{validate_url, Envelope, ItemsApi};
use crate::app::{ReadstashError, Result};
use crate::domain::{CreatedItem, Item, ItemStatus};

pub struct HttpItemsApi {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpItemsApi {
    pub fn new(base_url: &str, auth_token: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("readstash/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Read the body, unwrap the envelope, and map non-2xx responses to
    /// `Remote` (keeping the envelope message when one is present).
    async fn read_envelope<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|env| match env {
                    Envelope::Error { message } => Some(message),
                    Envelope::Success { .. } => None,
                })
                .unwrap_or_else(|| format!("request failed with status {}", status));
            return Err(ReadstashError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        envelope.into_result(status.as_u16())
    }
}

#[async_trait]
impl ItemsApi for HttpItemsApi {
    async fn create_item(&self, url: &str) -> Result<CreatedItem> {
        let url = validate_url(url)?;
        debug!(url = %url, "creating item");

        let response = self
            .request(Method::POST, "/items/create-item")
            .json(&json!({ "url": url }))
            .send()
            .await?;

        self.read_envelope(response).await
    }

    async fn get_item(&self, id: &str) -> Result<Item> {
        let response = self
            .request(Method::GET, &format!("/items/items/{}", id))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ReadstashError::NotFound(id.to_string()));
        }

        self.read_envelope(response).await
    }

    async fn list_items(&self, status: Option<ItemStatus>) -> Result<Vec<Item>> {
        let mut builder = self.request(Method::GET, "/items/items");
        if let Some(status) = status {
            builder = builder.query(&[("status", status.as_str())]);
        }

        let response = builder.send().await?;
        self.read_envelope(response).await
    }

    async fn sync_user(&self) -> Result<()> {
        let response = self.request(Method::POST, "/auth/sync-user").send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReadstashError::Remote {
                status: status.as_u16(),
                message: format!("user sync failed with status {}", status),
            });
        }
        Ok(())
    }
}
