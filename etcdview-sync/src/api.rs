//! HTTP client for the console's own `/api/kv` surface.
//!
//! Implements [`StoreGateway`] so the synchronization layer works the same
//! whether it sits on the store client directly or behind the HTTP proxy.
//! Non-2xx responses carry a `{"error": "..."}` body; its message is
//! surfaced, falling back to the HTTP status when the body is not JSON.

use async_trait::async_trait;
use etcdview_gateway::{GatewayError, GatewayResult, StoreGateway};
use etcdview_types::Entry;
use reqwest::{Response, StatusCode};
use serde::Deserialize;

/// Client for one console server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

#[derive(Deserialize)]
struct ListBody {
    #[serde(default)]
    items: Vec<Entry>,
}

#[derive(Deserialize)]
struct ItemBody {
    item: Entry,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    /// Creates a client for `base`, e.g. `http://127.0.0.1:8080`.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    async fn check(response: Response) -> GatewayResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        if status == StatusCode::BAD_REQUEST {
            Err(GatewayError::KeyRequired)
        } else {
            Err(GatewayError::Protocol(message))
        }
    }
}

fn transport_err(err: reqwest::Error) -> GatewayError {
    GatewayError::Unavailable(err.to_string())
}

#[async_trait]
impl StoreGateway for ApiClient {
    async fn list(&self, prefix: &str) -> GatewayResult<Vec<Entry>> {
        let prefix = if prefix.trim().is_empty() { "/" } else { prefix };
        let url = format!(
            "{}/api/kv?prefix={}",
            self.base,
            urlencoding::encode(prefix)
        );
        let response = self.http.get(url).send().await.map_err(transport_err)?;
        let body: ListBody = Self::check(response)
            .await?
            .json()
            .await
            .map_err(transport_err)?;
        Ok(body.items)
    }

    async fn get(&self, key: &str) -> GatewayResult<Option<Entry>> {
        // The surface has no single-key read; list the key as its own
        // prefix and pick the exact match.
        let key = key.trim();
        if key.is_empty() {
            return Err(GatewayError::KeyRequired);
        }
        let entries = self.list(key).await?;
        Ok(entries.into_iter().find(|entry| entry.key == key))
    }

    async fn put(&self, key: &str, value: &str) -> GatewayResult<Entry> {
        let url = format!("{}/api/kv", self.base);
        let response = self
            .http
            .put(url)
            .json(&serde_json::json!({ "key": key, "value": value }))
            .send()
            .await
            .map_err(transport_err)?;
        let body: ItemBody = Self::check(response)
            .await?
            .json()
            .await
            .map_err(transport_err)?;
        Ok(body.item)
    }

    async fn delete(&self, key: &str) -> GatewayResult<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(GatewayError::KeyRequired);
        }
        let url = format!("{}/api/kv/{}", self.base, urlencoding::encode(key));
        let response = self.http.delete(url).send().await.map_err(transport_err)?;
        Self::check(response).await?;
        Ok(())
    }
}
