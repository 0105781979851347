// crates/portal-client/src/client.rs
// Thin JSON-over-HTTP client shared by every endpoint binding

use crate::auth::{NoToken, TokenSource};
use crate::error::{PortalError, Result};
use crate::http::create_shared_client;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// Issues authenticated JSON requests against one base URL.
///
/// No retry, no backoff, no cancellation: a request either returns a
/// decoded body or a `PortalError`.
#[derive(Clone)]
pub struct ResourceClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl std::fmt::Debug for ResourceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ResourceClient {
    /// Unauthenticated client with its own connection pool
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(create_shared_client(), base_url, Arc::new(NoToken))
    }

    /// Client that reuses a shared pool and attaches tokens from `tokens`
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// POST without a request body (admin actions)
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send::<(), T>(Method::POST, path, None).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send::<(), T>(Method::DELETE, path, None).await
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(method = %method, path = %path, "sending request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("Accept", "application/json");
        if let Some(token) = self.tokens.access_token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(method = %method, path = %path, status = %status, "request rejected");
            return Err(PortalError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        debug!(path = %path, status = %status, bytes = bytes.len(), "response received");

        // An empty 2xx body decodes like JSON null so `()`/`Option` targets work
        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &bytes
        };
        serde_json::from_slice(raw).map_err(|source| PortalError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

/// Append a `page` query parameter, clamping page 0 to 1
pub fn paged(path: &str, page: u32) -> String {
    let page = page.max(1);
    if path.contains('?') {
        format!("{path}&page={page}")
    } else {
        format!("{path}?page={page}")
    }
}
