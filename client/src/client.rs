//! Transport adapter: the four-verb contract the store consumes.
//!
//! The store never talks HTTP directly; it goes through [`ResourceClient`]
//! so tests can substitute an in-memory transport. The real implementation
//! is a thin reqwest wrapper with no retries; retry policy, if any, is a
//! caller concern.

use crate::config::Config;
use async_trait::async_trait;
use rostra_engine::{Error, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Asynchronous four-verb contract with the remote resource API.
///
/// Every method rejects with [`Error::Transport`] on non-2xx responses or
/// network failure, carrying the server-provided status and message when
/// available.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value>;
    async fn post(&self, path: &str, body: &Value) -> Result<Value>;
    async fn put(&self, path: &str, body: &Value) -> Result<Value>;
    async fn delete(&self, path: &str) -> Result<Value>;
}

/// reqwest-backed [`ResourceClient`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Build a client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Transport {
                status: None,
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn handle(&self, path: &str, response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if status.is_success() {
            if status == reqwest::StatusCode::NO_CONTENT {
                return Ok(Value::Null);
            }
            return response.json().await.map_err(|e| Error::Transport {
                status: Some(status.as_u16()),
                message: format!("invalid JSON response: {e}"),
            });
        }

        // Prefer the server's own message field when the body is JSON
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message")
                    .or_else(|| body.get("error"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        warn!(path, status = status.as_u16(), %message, "request failed");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(path.to_string()));
        }
        Err(Error::Transport {
            status: Some(status.as_u16()),
            message,
        })
    }

    fn network_error(e: reqwest::Error) -> Error {
        Error::Transport {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl ResourceClient for HttpClient {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        debug!(path, params = query.len(), "GET");
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(Self::network_error)?;
        self.handle(path, response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(Self::network_error)?;
        self.handle(path, response).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        debug!(path, "PUT");
        let response = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(Self::network_error)?;
        self.handle(path, response).await
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        debug!(path, "DELETE");
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(Self::network_error)?;
        self.handle(path, response).await
    }
}
